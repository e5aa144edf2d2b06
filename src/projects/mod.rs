/// # The compiler's command-line surface and project settings
/// The library pipeline in `build_system` is usable on its own,
/// these modules only decide what to compile and where the output goes.

// The basic compiler CLI
pub mod cli;

pub mod settings;
