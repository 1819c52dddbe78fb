use std::fmt;

/// Storage format of a single vertex or instance attribute.
///
/// The set is closed: every variant resolves to a non-zero [`FormatInfo`]
/// through [`AttributeFormat::info`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AttributeFormat {
    Float1,
    Float2,
    Float3,
    Float4,
    Half1,
    Half2,
    Half3,
    Half4,
    /// 4x4 f32 matrix. Only valid as an instance attribute.
    Mat4x4,
    Uint8,
    Uint16,
    Uint32,
}

/// Size information of an [`AttributeFormat`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FormatInfo {
    /// Number of scalar components.
    pub component_count: u32,
    /// Size of one component in bytes.
    pub component_size: u32,
    /// `component_count * component_size`.
    pub size: u32,
}

impl FormatInfo {
    const fn new(component_count: u32, component_size: u32) -> Self {
        Self {
            component_count,
            component_size,
            size: component_count * component_size,
        }
    }
}

impl AttributeFormat {
    pub const ALL: [Self; 12] = [
        Self::Float1,
        Self::Float2,
        Self::Float3,
        Self::Float4,
        Self::Half1,
        Self::Half2,
        Self::Half3,
        Self::Half4,
        Self::Mat4x4,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
    ];

    /// Resolves the component count and byte sizes of this format.
    pub const fn info(self) -> FormatInfo {
        match self {
            Self::Float1 => FormatInfo::new(1, 4),
            Self::Float2 => FormatInfo::new(2, 4),
            Self::Float3 => FormatInfo::new(3, 4),
            Self::Float4 => FormatInfo::new(4, 4),
            Self::Half1 => FormatInfo::new(1, 2),
            Self::Half2 => FormatInfo::new(2, 2),
            Self::Half3 => FormatInfo::new(3, 2),
            Self::Half4 => FormatInfo::new(4, 2),
            Self::Mat4x4 => FormatInfo::new(16, 4),
            Self::Uint8 => FormatInfo::new(1, 1),
            Self::Uint16 => FormatInfo::new(1, 2),
            Self::Uint32 => FormatInfo::new(1, 4),
        }
    }

    /// Total size of one attribute of this format in bytes.
    pub const fn size(self) -> u32 {
        self.info().size
    }

    /// The wgpu vertex format this attribute can be fetched as, if wgpu has one.
    ///
    /// Matrices span several vertex slots and return `None`; see the instance
    /// layout for how those are described.
    pub const fn vertex_format(self) -> Option<wgt::VertexFormat> {
        match self {
            Self::Float1 => Some(wgt::VertexFormat::Float32),
            Self::Float2 => Some(wgt::VertexFormat::Float32x2),
            Self::Float3 => Some(wgt::VertexFormat::Float32x3),
            Self::Float4 => Some(wgt::VertexFormat::Float32x4),
            Self::Half2 => Some(wgt::VertexFormat::Float16x2),
            Self::Half4 => Some(wgt::VertexFormat::Float16x4),
            Self::Uint32 => Some(wgt::VertexFormat::Uint32),
            Self::Half1 | Self::Half3 | Self::Mat4x4 | Self::Uint8 | Self::Uint16 => None,
        }
    }

    /// WGSL type the attribute is read as in a shader.
    pub const fn shader_type(self) -> &'static str {
        match self {
            Self::Float1 | Self::Half1 => "f32",
            Self::Float2 | Self::Half2 => "vec2<f32>",
            Self::Float3 | Self::Half3 => "vec3<f32>",
            Self::Float4 | Self::Half4 => "vec4<f32>",
            Self::Mat4x4 => "mat4x4<f32>",
            Self::Uint8 | Self::Uint16 | Self::Uint32 => "u32",
        }
    }
}

/// What a vertex attribute means. Only used to name attributes and to find
/// their source data, never to decide how they are packed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VertexRole {
    Position,
    Normal,
    Tangent,
    Bitangent,
    Color,
}

impl VertexRole {
    pub const ALL: [Self; 5] = [
        Self::Position,
        Self::Normal,
        Self::Tangent,
        Self::Bitangent,
        Self::Color,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Normal => "normal",
            Self::Tangent => "tangent",
            Self::Bitangent => "bitangent",
            Self::Color => "color",
        }
    }
}

impl fmt::Display for VertexRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One slot of a vertex layout.
///
/// A slot without a format is a null attribute: it is kept in the descriptor
/// list but takes up no bytes and gets no shader location.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AttributeDescriptor {
    pub role: VertexRole,
    pub format: Option<AttributeFormat>,
}

impl AttributeDescriptor {
    pub const fn new(role: VertexRole, format: AttributeFormat) -> Self {
        Self {
            role,
            format: Some(format),
        }
    }

    /// Declares a slot for `role` that occupies no space in the layout.
    pub const fn null(role: VertexRole) -> Self {
        Self { role, format: None }
    }

    /// Size of this slot in bytes. Zero for null slots.
    pub const fn size(&self) -> u32 {
        match self.format {
            Some(format) => format.size(),
            None => 0,
        }
    }

    pub const fn is_null(&self) -> bool {
        self.size() == 0
    }
}

impl From<(VertexRole, AttributeFormat)> for AttributeDescriptor {
    fn from((role, format): (VertexRole, AttributeFormat)) -> Self {
        Self::new(role, format)
    }
}

/// Width of the elements of an index buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IndexFormat {
    Uint8,
    Uint16,
    /// Declared for completeness. The index packer rejects it.
    Uint24,
    Uint32,
}

impl IndexFormat {
    pub const fn byte_width(self) -> u32 {
        match self {
            Self::Uint8 => 1,
            Self::Uint16 => 2,
            Self::Uint24 => 3,
            Self::Uint32 => 4,
        }
    }

    /// Largest vertex count whose indices all fit in this format. `None` when
    /// every `u32` index fits.
    pub const fn max_vertex_count(self) -> Option<u64> {
        match self {
            Self::Uint8 => Some(1 << 8),
            Self::Uint16 => Some(1 << 16),
            Self::Uint24 => Some(1 << 24),
            Self::Uint32 => None,
        }
    }

    /// Returns true if every index in `0..vertex_count` is representable.
    pub const fn can_address(self, vertex_count: u64) -> bool {
        match self.max_vertex_count() {
            Some(max) => vertex_count <= max,
            None => true,
        }
    }

    /// Smallest packable format that can address `vertex_count` vertices.
    pub const fn smallest_for(vertex_count: u64) -> Self {
        if Self::Uint8.can_address(vertex_count) {
            Self::Uint8
        } else if Self::Uint16.can_address(vertex_count) {
            Self::Uint16
        } else {
            Self::Uint32
        }
    }

    /// The matching wgpu index format. wgpu only has 16 and 32 bit indices.
    pub const fn to_wgt(self) -> Option<wgt::IndexFormat> {
        match self {
            Self::Uint16 => Some(wgt::IndexFormat::Uint16),
            Self::Uint32 => Some(wgt::IndexFormat::Uint32),
            Self::Uint8 | Self::Uint24 => None,
        }
    }
}
