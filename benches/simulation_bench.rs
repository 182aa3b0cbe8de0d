use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rigid_sim2d::{JointHandle, Polygon, RevoluteJoint, RigidBody, Vec2, World, WorldConfig};

// --- Helper for creating chain benchmarks ---
fn build_chain(num_links: usize) -> World {
    let mut world = World::new(WorldConfig::default().without_ground());
    let link_length = 0.5;

    let anchor_pos = Vec2::new(0.0, 5.0);
    let anchor = RigidBody::new_static(Polygon::rectangle(0.2, 0.2).unwrap(), anchor_pos, 0.0).unwrap();
    let mut last = world.add_body(anchor);

    for i in 0..num_links {
        let center = anchor_pos + Vec2::new(link_length * (i as f64 + 0.5), 0.0);
        let link = RigidBody::new(Polygon::rectangle(link_length, 0.1).unwrap(), 1.0, center, 0.0).unwrap();
        let current = world.add_body(link);

        let anchor_a = if i == 0 {
            Vec2::ZERO
        } else {
            Vec2::new(link_length / 2.0, 0.0)
        };
        world
            .add_joint(RevoluteJoint::new(last, current, anchor_a, Vec2::new(-link_length / 2.0, 0.0)))
            .unwrap();
        last = current;
    }
    world
}

// --- Helper for the four-segment leg ---
fn build_biped() -> (World, Vec<JointHandle>) {
    let mut world = World::default();
    let torso = world.add_body(RigidBody::new(Polygon::rectangle(0.4, 0.6).unwrap(), 10.0, Vec2::new(0.0, 1.6), 0.0).unwrap());
    let thigh = world.add_body(RigidBody::new(Polygon::rectangle(0.1, 0.5).unwrap(), 3.0, Vec2::new(0.0, 1.05), 0.0).unwrap());
    let shin = world.add_body(RigidBody::new(Polygon::rectangle(0.08, 0.5).unwrap(), 2.0, Vec2::new(0.0, 0.55), 0.0).unwrap());
    let foot = world.add_body(RigidBody::new(Polygon::rectangle(0.3, 0.06).unwrap(), 1.0, Vec2::new(0.05, 0.27), 0.0).unwrap());

    let joints = vec![
        world.add_joint_at(torso, thigh, Vec2::new(0.0, 1.3)).unwrap(),
        world.add_joint_at(thigh, shin, Vec2::new(0.0, 0.8)).unwrap(),
        world.add_joint_at(shin, foot, Vec2::new(0.0, 0.3)).unwrap(),
    ];
    (world, joints)
}

// Benchmark for a hanging chain swinging under gravity
fn bench_joint_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("joint_chain");

    for num_links in [10, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_links), num_links, |b, &n| {
            b.iter(|| {
                let mut world = build_chain(black_box(n));
                for _ in 0..30 {
                    world.step(black_box(1.0 / 60.0), 4).unwrap();
                }
                world
            });
        });
    }
    group.finish();
}

// Benchmark for one second of a driven leg with ground contact
fn bench_biped(c: &mut Criterion) {
    let mut group = c.benchmark_group("biped");

    for substeps in [4u32, 8, 16].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(substeps), substeps, |b, &s| {
            b.iter(|| {
                let (mut world, joints) = build_biped();
                for frame in 0..60 {
                    let torque = if frame % 30 < 15 { 5.0 } else { -5.0 };
                    for &joint in &joints {
                        world.joint_mut(joint).unwrap().motor_torque = torque;
                    }
                    world.step(black_box(1.0 / 60.0), black_box(s)).unwrap();
                }
                world
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_joint_chain, bench_biped);
criterion_main!(benches);
