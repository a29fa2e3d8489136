use crate::render::error::SetupError;
use crate::render::reflect;

/// Resolved `@location` of a vertex attribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttributeLocation(pub u32);

/// Resolved `@group/@binding` of a uniform, texture or sampler.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformLocation {
    pub group: u32,
    pub binding: u32,
}

/// Fixed-function state a program is linked against.
pub struct LinkOptions<'a> {
    pub layout: &'a wgpu::PipelineLayout,
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub format: wgpu::TextureFormat,
    pub blend: wgpu::BlendState,
    pub sample_count: u32,
}

/// A compiled WGSL program holding both the vertex (`vs_main`) and fragment
/// (`fs_main`) stages.
///
/// The source text is kept so uniform and attribute names can be resolved
/// after compilation. Not `Clone`: one program owns one shader module.
pub struct ShaderProgram {
    label: &'static str,
    source: String,
    module: wgpu::ShaderModule,
}

impl ShaderProgram {
    /// Compiles `source`. Validation errors are logged and returned.
    pub fn compile(
        device: &wgpu::Device,
        label: &'static str,
        source: impl Into<String>,
    ) -> Result<Self, SetupError> {
        let source = source.into();

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.as_str().into()),
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            let log = err.to_string();
            log::error!("shader program `{label}` failed to compile:\n{log}");
            return Err(SetupError::Compile { program: label, log });
        }

        log::debug!("compiled shader program `{label}`");
        Ok(Self {
            label,
            source,
            module,
        })
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn attribute_location(&self, name: &'static str) -> Result<AttributeLocation, SetupError> {
        reflect::find_attribute(&self.source, name)
            .map(AttributeLocation)
            .ok_or_else(|| {
                log::error!("shader program `{}` has no attribute `{name}`", self.label);
                SetupError::MissingAttribute {
                    program: self.label,
                    name,
                }
            })
    }

    pub fn uniform_location(&self, name: &'static str) -> Result<UniformLocation, SetupError> {
        reflect::find_binding(&self.source, name)
            .map(|(group, binding)| UniformLocation { group, binding })
            .ok_or_else(|| {
                log::error!("shader program `{}` has no uniform `{name}`", self.label);
                SetupError::MissingUniform {
                    program: self.label,
                    name,
                }
            })
    }

    /// Builds the render pipeline for this program. Validation errors are
    /// logged and returned.
    pub fn link(
        &self,
        device: &wgpu::Device,
        options: &LinkOptions<'_>,
    ) -> Result<wgpu::RenderPipeline, SetupError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label),
            layout: Some(options.layout),

            vertex: wgpu::VertexState {
                module: &self.module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: options.buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: &self.module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: options.format,
                    blend: Some(options.blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: options.sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },

            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            let log = err.to_string();
            log::error!("shader program `{}` failed to link:\n{log}", self.label);
            return Err(SetupError::Link {
                program: self.label,
                log,
            });
        }

        Ok(pipeline)
    }
}
