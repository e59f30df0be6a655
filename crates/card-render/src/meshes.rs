use card_core::mesh::{unit_mesh, Vertex};
use card_core::scene::MeshKind;
use wgpu::util::DeviceExt;

pub struct GpuMesh {
    pub vertices: wgpu::Buffer,
    pub indices: wgpu::Buffer,
    pub index_count: u32,
}

/// One buffer pair per unit mesh; every node instance-draws one of these.
pub struct MeshLibrary {
    meshes: [GpuMesh; 5],
}

impl MeshLibrary {
    pub fn new(device: &wgpu::Device) -> Self {
        let meshes = MeshKind::ALL.map(|kind| {
            let data = unit_mesh(kind);
            GpuMesh {
                vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("unit_mesh_vb"),
                    contents: bytemuck::cast_slice(&data.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
                indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("unit_mesh_ib"),
                    contents: bytemuck::cast_slice(&data.indices),
                    usage: wgpu::BufferUsages::INDEX,
                }),
                index_count: data.indices.len() as u32,
            }
        });
        Self { meshes }
    }

    pub fn get(&self, kind: MeshKind) -> &GpuMesh {
        &self.meshes[slot(kind)]
    }
}

fn slot(kind: MeshKind) -> usize {
    match kind {
        MeshKind::Box => 0,
        MeshKind::Cylinder => 1,
        MeshKind::Cone => 2,
        MeshKind::Sphere => 3,
        MeshKind::Plane => 4,
    }
}

pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}
