//! Shader compilation and program linking.
//!
//! Compile and link failures are reported as diagnostics, not errors: the
//! demo logs the driver's info log and keeps running with whatever program
//! the driver produced. Only failing to allocate a shader or program object
//! at all is returned as `Err`.
//!
//! Shader objects never outlive [`build_program`]: both are deleted after
//! linking whether or not compilation or linking succeeded.
//!
//! The build sequence runs against a [`ShaderBackend`]; [`GpuContext`] is
//! the only production implementation.

use super::context::GpuContext;
use thiserror::Error;

/// Errors that can occur while building the pipeline.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// A shader stage failed to compile.
    #[error("{stage} shader compilation failed:\n{log}")]
    CompileError {
        /// The shader stage that failed.
        stage: ShaderStage,
        /// The driver's info log, with the numbered source prepended.
        log: String,
    },
    /// The program failed to link.
    #[error("shader program linking failed:\n{0}")]
    LinkError(String),
    /// The driver could not allocate a shader or program object.
    #[error("cannot create {object}: {reason}")]
    CreateError { object: String, reason: String },
}

/// Programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The `GL_*_SHADER` enum for `glCreateShader`.
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The GL calls [`build_program`] makes.
pub trait ShaderBackend {
    type Shader: Copy;
    type Program: Copy;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;

    /// Uploads `source`, compiles it, and returns the compile status.
    fn compile(&self, shader: Self::Shader, source: &str) -> bool;

    fn shader_log(&self, shader: Self::Shader) -> String;

    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;

    /// Attaches both shaders, links, detaches them again, and returns the
    /// program's link status.
    fn link(&self, program: Self::Program, vertex: Self::Shader, fragment: Self::Shader) -> bool;

    fn program_log(&self, program: Self::Program) -> String;

    fn use_program(&self, program: Self::Program);

    fn delete_program(&self, program: Self::Program);
}

// SAFETY (all methods): glow wraps raw GL calls as unsafe. Every handle
// passed in was created by this context, and stage enums come from
// `ShaderStage::gl_type`.
#[allow(unsafe_code)]
impl ShaderBackend for GpuContext {
    type Shader = glow::Shader;
    type Program = glow::Program;

    fn create_shader(&self, stage: ShaderStage) -> Result<glow::Shader, String> {
        use glow::HasContext;
        unsafe { self.gl().create_shader(stage.gl_type()) }
    }

    fn compile(&self, shader: glow::Shader, source: &str) -> bool {
        use glow::HasContext;
        let gl = self.gl();
        unsafe {
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            gl.get_shader_compile_status(shader)
        }
    }

    fn shader_log(&self, shader: glow::Shader) -> String {
        use glow::HasContext;
        unsafe { self.gl().get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        use glow::HasContext;
        unsafe { self.gl().delete_shader(shader) }
    }

    fn create_program(&self) -> Result<glow::Program, String> {
        use glow::HasContext;
        unsafe { self.gl().create_program() }
    }

    fn link(&self, program: glow::Program, vertex: glow::Shader, fragment: glow::Shader) -> bool {
        use glow::HasContext;
        let gl = self.gl();
        unsafe {
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);
            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.get_program_link_status(program)
        }
    }

    fn program_log(&self, program: glow::Program) -> String {
        use glow::HasContext;
        unsafe { self.gl().get_program_info_log(program) }
    }

    // Using a program that failed to link is a GL error, not undefined
    // behavior.
    fn use_program(&self, program: glow::Program) {
        use glow::HasContext;
        unsafe { self.gl().use_program(Some(program)) }
    }

    fn delete_program(&self, program: glow::Program) {
        use glow::HasContext;
        unsafe { self.gl().delete_program(program) }
    }
}

/// A GL object handle plus the diagnostic produced while building it.
///
/// A `Some` diagnostic means the handle is valid but unusable for drawing.
#[derive(Debug)]
pub struct Built<H> {
    pub handle: H,
    pub diagnostic: Option<ShaderError>,
}

/// The linked, active program and every diagnostic collected while
/// building it.
#[derive(Debug)]
pub struct Program<P = glow::Program> {
    handle: P,
    diagnostics: Vec<ShaderError>,
}

impl<P: Copy> Program<P> {
    pub fn handle(&self) -> P {
        self.handle
    }

    pub fn diagnostics(&self) -> &[ShaderError] {
        &self.diagnostics
    }

    /// Whether both stages compiled and the program linked.
    pub fn is_linked(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Releases the program object.
    pub fn delete<B: ShaderBackend<Program = P>>(self, backend: &B) {
        backend.delete_program(self.handle);
    }
}

/// Formats a shader compilation error for human-readable debugging.
///
/// Prepends right-aligned line numbers to each line of `source`, then
/// appends the driver's error `log`, so line references in the log can be
/// matched against the GLSL.
///
/// Both `source` and `log` may be empty.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let source_lines: Vec<&str> = source.lines().collect();
    let width = source_lines.len().max(1).to_string().len();

    let numbered = source_lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, true) => String::new(),
        (true, false) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

/// Compiles a single shader stage.
///
/// Returns the shader handle even if compilation failed; the failure is
/// carried in [`Built::diagnostic`] and the caller still owns (and must
/// delete) the handle.
///
/// # Errors
///
/// Returns `ShaderError::CreateError` if no shader object could be created.
pub fn compile_shader<B: ShaderBackend>(
    backend: &B,
    stage: ShaderStage,
    source: &str,
) -> Result<Built<B::Shader>, ShaderError> {
    let shader = backend
        .create_shader(stage)
        .map_err(|reason| ShaderError::CreateError {
            object: format!("{stage} shader"),
            reason,
        })?;

    let diagnostic = if backend.compile(shader, source) {
        None
    } else {
        Some(ShaderError::CompileError {
            stage,
            log: format_shader_error(source, &backend.shader_log(shader)),
        })
    };

    Ok(Built {
        handle: shader,
        diagnostic,
    })
}

/// Links a vertex and fragment shader into a program.
///
/// Success is read from the program's link status and the program info
/// log, never from a shader query. Shaders are detached after linking; the
/// caller still owns and deletes them.
///
/// # Errors
///
/// Returns `ShaderError::CreateError` if no program object could be created.
pub fn link_program<B: ShaderBackend>(
    backend: &B,
    vertex: B::Shader,
    fragment: B::Shader,
) -> Result<Built<B::Program>, ShaderError> {
    let program = backend
        .create_program()
        .map_err(|reason| ShaderError::CreateError {
            object: "shader program".to_string(),
            reason,
        })?;

    let diagnostic = if backend.link(program, vertex, fragment) {
        None
    } else {
        Some(ShaderError::LinkError(backend.program_log(program)))
    };

    Ok(Built {
        handle: program,
        diagnostic,
    })
}

/// Compiles both stages, links them, deletes the shader objects, and makes
/// the program current.
///
/// Compile and link failures are logged at error level as soon as they are
/// known and collected in [`Program::diagnostics`]; the build continues
/// past them.
///
/// # Errors
///
/// Returns `ShaderError::CreateError` if a shader or program object could
/// not be allocated. Any shader created before the failure is deleted.
pub fn build_program<B: ShaderBackend>(
    backend: &B,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<Program<B::Program>, ShaderError> {
    let vert = compile_shader(backend, ShaderStage::Vertex, vertex_src)?;
    let frag = match compile_shader(backend, ShaderStage::Fragment, fragment_src) {
        Ok(f) => f,
        Err(e) => {
            backend.delete_shader(vert.handle);
            return Err(e);
        }
    };

    let mut diagnostics: Vec<ShaderError> =
        vert.diagnostic.into_iter().chain(frag.diagnostic).collect();
    for diagnostic in &diagnostics {
        log::error!("{diagnostic}");
    }

    let linked = link_program(backend, vert.handle, frag.handle);

    // A linked program keeps its own copy of the binaries.
    backend.delete_shader(vert.handle);
    backend.delete_shader(frag.handle);

    let linked = linked?;
    if let Some(diagnostic) = &linked.diagnostic {
        log::error!("{diagnostic}");
    }
    diagnostics.extend(linked.diagnostic);

    backend.use_program(linked.handle);

    Ok(Program {
        handle: linked.handle,
        diagnostics,
    })
}
