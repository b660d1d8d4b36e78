use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trestle_applib::{BeanSort, DomainRegistry, ObjectDef, PropertyDef};
use trestle_ident::LogicalTypeName;
use trestle_layout::GridLoader;
use trestle_metamodel::{FacetKind, ObjectSpecification, ProgrammingModel, SpecificationLoader};

fn sample_spec() -> Arc<ObjectSpecification> {
    let name = LogicalTypeName::parse("bench.Customer").unwrap();
    let mut def = ObjectDef::new(name.clone(), BeanSort::Entity);
    for i in 0..20 {
        def = def.with_property(PropertyDef::new(&format!("field{i}"), "Str"));
    }
    let mut registry = DomainRegistry::new();
    registry.register(def).unwrap();
    let grid_loader = Arc::new(GridLoader::new(std::env::temp_dir(), true));
    let loader = SpecificationLoader::new(registry, ProgrammingModel::default_model(grid_loader));
    loader.load_specification(&name).unwrap()
}

fn bench_facet_lookup(c: &mut Criterion) {
    let spec = sample_spec();
    let property = spec.property("field10").unwrap();

    c.bench_function("class_facet_lookup", |b| {
        b.iter(|| black_box(spec.get_facet(black_box(FacetKind::Title))))
    });

    c.bench_function("member_facet_lookup", |b| {
        b.iter(|| {
            black_box(
                property
                    .holder()
                    .get_facet(black_box(FacetKind::Optionality)),
            )
        })
    });

    c.bench_function("property_lookup_by_id", |b| {
        b.iter(|| black_box(spec.property(black_box("field10"))))
    });
}

fn bench_specification_build(c: &mut Criterion) {
    c.bench_function("build_specification", |b| {
        b.iter(|| black_box(sample_spec()))
    });
}

criterion_group!(benches, bench_facet_lookup, bench_specification_build);
criterion_main!(benches);
