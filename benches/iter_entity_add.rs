use std::time::Duration;

use criterion::*;
use dynface::{test_util, Hooks};
use rand::Rng;
use xias::Xias;

#[derive(Default)]
struct PositionX(f64);
#[derive(Default)]
struct PositionY(f64);
#[derive(Default)]
struct PositionZ(f64);
#[derive(Default)]
struct VelocityX(f64);
#[derive(Default)]
struct VelocityY(f64);
#[derive(Default)]
struct VelocityZ(f64);

fn iter_entity_add_individual(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter entity (a += b)");
    group.measurement_time(Duration::from_secs(10));

    for log_entities in (4..=16).step_by(4) {
        let num_entities: u64 = 1 << log_entities;
        group.throughput(Throughput::Elements(num_entities));
        group.bench_with_input(
            BenchmarkId::new("individual", format!("{num_entities} entities")),
            &num_entities,
            |b, &num_entities| {
                test_util::init();
                let mut ecs = dynface::Ecs::with_capacity(num_entities.small_int());
                ecs.component_register(Hooks::<PositionX>::new()).expect("fresh instance");
                ecs.component_register(Hooks::<PositionY>::new()).expect("fresh instance");
                ecs.component_register(Hooks::<PositionZ>::new()).expect("fresh instance");
                ecs.component_register(Hooks::<VelocityX>::new()).expect("fresh instance");
                ecs.component_register(Hooks::<VelocityY>::new()).expect("fresh instance");
                ecs.component_register(Hooks::<VelocityZ>::new()).expect("fresh instance");
                ecs.system_register(
                    "add",
                    |world, batch, _| {
                        for &entity in batch {
                            let vx = world.entity_get_component::<VelocityX>(entity)?.0;
                            let vy = world.entity_get_component::<VelocityY>(entity)?.0;
                            let vz = world.entity_get_component::<VelocityZ>(entity)?.0;
                            world.entity_get_component_mut::<PositionX>(entity)?.0 += vx;
                            world.entity_get_component_mut::<PositionY>(entity)?.0 += vy;
                            world.entity_get_component_mut::<PositionZ>(entity)?.0 += vz;
                        }
                        Ok(())
                    },
                    None,
                    None,
                )
                .expect("fresh instance");

                let mut rng = rand::thread_rng();
                for _ in 0..num_entities {
                    let entity = ecs.entity_create().expect("initialized");
                    ecs.entity_add_component(entity, Some(PositionX(rng.gen_range(-65536.0 ..= 65536.0)))).expect("registered");
                    ecs.entity_add_component(entity, Some(PositionY(rng.gen_range(-65536.0 ..= 65536.0)))).expect("registered");
                    ecs.entity_add_component(entity, Some(PositionZ(rng.gen_range(-65536.0 ..= 65536.0)))).expect("registered");
                    ecs.entity_add_component(entity, Some(VelocityX(rng.gen_range(-65536.0 ..= 65536.0)))).expect("registered");
                    ecs.entity_add_component(entity, Some(VelocityY(rng.gen_range(-65536.0 ..= 65536.0)))).expect("registered");
                    ecs.entity_add_component(entity, Some(VelocityZ(rng.gen_range(-65536.0 ..= 65536.0)))).expect("registered");
                }
                b.iter(|| ecs.update(1.0).expect("all entities have all components"))
            },
        );
    }
}

#[derive(Default)]
struct PositionArray([f64; 3]);
#[derive(Default)]
struct VelocityArray([f64; 3]);

fn iter_entity_add_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter entity (a += b)");
    group.measurement_time(Duration::from_secs(10));

    for log_entities in (4..=16).step_by(4) {
        let num_entities: u64 = 1 << log_entities;
        group.throughput(Throughput::Elements(num_entities));
        group.bench_with_input(
            BenchmarkId::new("array", format!("{num_entities} entities")),
            &num_entities,
            |b, &num_entities| {
                test_util::init();
                let mut ecs = dynface::Ecs::with_capacity(num_entities.small_int());
                ecs.component_register(Hooks::<PositionArray>::new()).expect("fresh instance");
                ecs.component_register(Hooks::<VelocityArray>::new()).expect("fresh instance");
                ecs.system_register(
                    "add",
                    |world, batch, _| {
                        for &entity in batch {
                            let v = world.entity_get_component::<VelocityArray>(entity)?.0;
                            let p = world.entity_get_component_mut::<PositionArray>(entity)?;
                            for i in 0..3 {
                                p.0[i] += v[i];
                            }
                        }
                        Ok(())
                    },
                    None,
                    None,
                )
                .expect("fresh instance");
                ecs.system_require::<PositionArray>("add").expect("registered");
                ecs.system_require::<VelocityArray>("add").expect("registered");

                let mut rng = rand::thread_rng();
                for _ in 0..num_entities {
                    let entity = ecs.entity_create().expect("initialized");
                    ecs.entity_add_component(
                        entity,
                        Some(PositionArray([
                            rng.gen_range(-65536.0 ..= 65536.0),
                            rng.gen_range(-65536.0 ..= 65536.0),
                            rng.gen_range(-65536.0 ..= 65536.0),
                        ])),
                    )
                    .expect("registered");
                    ecs.entity_add_component(
                        entity,
                        Some(VelocityArray([
                            rng.gen_range(-65536.0 ..= 65536.0),
                            rng.gen_range(-65536.0 ..= 65536.0),
                            rng.gen_range(-65536.0 ..= 65536.0),
                        ])),
                    )
                    .expect("registered");
                }
                b.iter(|| ecs.update(1.0).expect("all entities have all components"))
            },
        );
    }
}

criterion_group!(individual, iter_entity_add_individual);
criterion_group!(array, iter_entity_add_array);
criterion_main!(individual, array);
