//! Benchmarks for attribute refresh.

use criterion::{criterion_group, criterion_main, Criterion};
use lamella::prelude::*;
use nalgebra::Point3;

fn create_grid_mesh(n: usize) -> HalfEdgeMesh {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n * 2);

    // Create grid vertices with a gentle height field so normals vary
    for j in 0..=n {
        for i in 0..=n {
            let z = ((i as f64) * 0.3).sin() * ((j as f64) * 0.3).cos();
            vertices.push(Point3::new(i as f64, j as f64, z));
        }
    }

    // Create triangles
    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            faces.push([v00, v10, v11]);
            faces.push([v00, v11, v01]);
        }
    }

    build_from_triangles(&vertices, &faces).unwrap()
}

fn bench_refresh_all(c: &mut Criterion) {
    c.bench_function("refresh_all_grid_50x50", |b| {
        let mut mesh = create_grid_mesh(50);
        b.iter(|| refresh_all(&mut mesh).unwrap());
    });
}

fn bench_refresh_local(c: &mut Criterion) {
    // One interior vertex and its six incident faces, the typical
    // post-edit working set
    c.bench_function("refresh_one_ring_grid_50x50", |b| {
        let n = 50;
        let mut mesh = create_grid_mesh(n);
        refresh_all(&mut mesh).unwrap();

        let v = VertexId::new(25 * (n + 1) + 25);
        let faces: Vec<FaceId> = mesh.neighbors(v).map(|he| mesh.face_of(he)).collect();

        b.iter(|| {
            refresh_face_attributes(&mut mesh, &faces).unwrap();
            refresh_vertex_neighbors(&mut mesh, &[v]).unwrap();
        });
    });
}

criterion_group!(benches, bench_refresh_all, bench_refresh_local);
criterion_main!(benches);
