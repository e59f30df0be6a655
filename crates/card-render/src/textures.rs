use crate::helpers;
use card_core::label::Bitmap;
use card_core::scene::TextureKey;
use fnv::FnvHashMap;

pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub struct GpuTexture {
    _texture: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
}

/// Textures by key, plus a white fallback for untextured materials and for
/// textures that have not arrived yet.
pub struct TextureCache {
    pub layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white: GpuTexture,
    entries: FnvHashMap<TextureKey, GpuTexture>,
}

impl TextureCache {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let white_px = Bitmap {
            width: 1,
            height: 1,
            pixels: vec![255; 4],
        };
        let white = create(device, queue, &layout, &sampler, "white", &white_px);
        Self {
            layout,
            sampler,
            white,
            entries: FnvHashMap::default(),
        }
    }

    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        key: TextureKey,
        bitmap: &Bitmap,
    ) -> bool {
        if !bitmap.is_well_formed() || bitmap.width == 0 || bitmap.height == 0 {
            log::warn!("[render] ignoring malformed bitmap for {:?}", key);
            return false;
        }
        let tex = create(device, queue, &self.layout, &self.sampler, "scene_texture", bitmap);
        self.entries.insert(key, tex);
        true
    }

    pub fn bind_group(&self, key: Option<TextureKey>) -> &wgpu::BindGroup {
        key.and_then(|k| self.entries.get(&k))
            .map(|t| &t.bind_group)
            .unwrap_or(&self.white.bind_group)
    }

    pub fn contains(&self, key: TextureKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&TextureKey) -> bool) {
        self.entries.retain(|k, _| keep(k));
    }
}

fn create(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    label: &str,
    bitmap: &Bitmap,
) -> GpuTexture {
    let (texture, view) = helpers::create_color_texture(
        device,
        label,
        bitmap.width,
        bitmap.height,
        TEXTURE_FORMAT,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &bitmap.pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(bitmap.width * 4),
            rows_per_image: Some(bitmap.height),
        },
        wgpu::Extent3d {
            width: bitmap.width,
            height: bitmap.height,
            depth_or_array_layers: 1,
        },
    );
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    GpuTexture {
        _texture: texture,
        bind_group,
    }
}
