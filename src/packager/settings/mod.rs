//! Configuration structures for a packaging run.
//!
//! The host service descriptor is parsed into [`ServiceDescriptor`] and
//! turned into [`Settings`], which answers each configuration question with
//! the user's value or a fixed default.

mod arch;
mod builder;
mod core;
mod de;
mod descriptor;
mod function;

pub use arch::Architecture;
pub use builder::SettingsBuilder;
pub use self::core::{BUNDLER_OUTPUT_DIR, DEFAULT_PACKAGE_MANAGER, Settings};
pub use descriptor::{
    CustomSection, PackageSection, PrismaSettings, ProviderSection, ServiceDescriptor,
    WebpackSettings,
};
pub use function::{DEFAULT_RUNTIME, FunctionDefinition};
