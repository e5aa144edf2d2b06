pub mod backends {
    pub mod js;
}

pub mod build_system {
    pub mod build;
}

pub mod compiler_frontend;
pub mod projects;

pub use backends::js::js_runtime::RuntimeLinkage;
pub use build_system::build::{BuildResult, CompiledProgram, build_files, compile_file, compile_source};
pub use compiler_frontend::Flag;
pub use projects::settings::Config;
