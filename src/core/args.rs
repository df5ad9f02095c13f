//! Configuration-tool argument construction.
//!
//! Arguments are a pure function of the toolchain and a variant's flags:
//! the common arguments come first, in a fixed order, followed by the
//! variant's install prefix, build type, optimization flags and any extra
//! arguments.

use crate::core::variant::Variant;

/// Fixed toolchain shared by both variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// CMake generator name (passed as `-G<generator>`)
    pub generator: String,
    /// C compiler
    pub cc: String,
    /// C++ compiler
    pub cxx: String,
    /// Linker
    pub linker: String,
    /// C++ flags common to both variants
    pub cxxflags: Vec<String>,
    /// Executable linker flags
    pub ldflags: Vec<String>,
    /// Emit compile_commands.json
    pub compile_commands: bool,
}

impl Default for Toolchain {
    fn default() -> Self {
        Toolchain {
            generator: "Ninja".to_string(),
            cc: "clang-6.0".to_string(),
            cxx: "clang++-6.0".to_string(),
            linker: "ld.gold".to_string(),
            cxxflags: vec![
                "-stdlib=libc++".to_string(),
                "-fcoroutines-ts".to_string(),
                "-std=c++17".to_string(),
            ],
            ldflags: vec!["-lc++abi".to_string(), "-stdlib=libc++".to_string()],
            compile_commands: true,
        }
    }
}

impl Toolchain {
    /// Arguments identical for every variant.
    pub fn common_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("-G{}", self.generator),
            format!("-DCMAKE_C_COMPILER={}", self.cc),
            format!("-DCMAKE_LINKER={}", self.linker),
            format!("-DCMAKE_CXX_COMPILER={}", self.cxx),
            format!("-DCMAKE_CXX_FLAGS={}", self.cxxflags.join(" ")),
            format!("-DCMAKE_EXE_LINKER_FLAGS={}", self.ldflags.join(" ")),
        ];
        if self.compile_commands {
            args.push("-DCMAKE_EXPORT_COMPILE_COMMANDS=ON".to_string());
        }
        args
    }
}

/// Which optimization flags each variant receives.
///
/// `Legacy` is the mapping projects were historically configured with: the
/// debug tree is optimized and the release tree carries full debug symbols.
/// `Conventional` swaps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizationMapping {
    #[default]
    Legacy,
    Conventional,
}

impl OptimizationMapping {
    /// Optimization/debug-info flags for `variant`.
    pub fn flags(&self, variant: Variant) -> Vec<String> {
        let optimized = || vec!["-O3".to_string()];
        let symbols = || vec!["-ggdb3".to_string(), "-O0".to_string()];

        match (self, variant) {
            (OptimizationMapping::Legacy, Variant::Debug) => optimized(),
            (OptimizationMapping::Legacy, Variant::Release) => symbols(),
            (OptimizationMapping::Conventional, Variant::Debug) => symbols(),
            (OptimizationMapping::Conventional, Variant::Release) => optimized(),
        }
    }
}

impl std::str::FromStr for OptimizationMapping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(OptimizationMapping::Legacy),
            "conventional" => Ok(OptimizationMapping::Conventional),
            _ => Err(format!(
                "invalid optimization mapping '{}'; expected 'legacy' or 'conventional'",
                s
            )),
        }
    }
}

/// Per-variant configure flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantFlags {
    pub variant: Variant,
    /// `CMAKE_INSTALL_PREFIX`
    pub install_prefix: String,
    /// Optimization and debug-info flags, prepended to the common C++ flags
    pub opt_flags: Vec<String>,
    /// Extra arguments appended after the generated ones
    pub extra_args: Vec<String>,
}

impl VariantFlags {
    /// Default flags for `variant` under `mapping`.
    pub fn new(variant: Variant, mapping: OptimizationMapping) -> Self {
        VariantFlags {
            variant,
            install_prefix: format!("{}-install", variant.as_str()),
            opt_flags: mapping.flags(variant),
            extra_args: Vec::new(),
        }
    }

    /// Arguments specific to this variant.
    pub fn args(&self, toolchain: &Toolchain) -> Vec<String> {
        let cxxflags: Vec<&str> = self
            .opt_flags
            .iter()
            .chain(toolchain.cxxflags.iter())
            .map(String::as_str)
            .collect();

        let mut args = vec![
            format!("-DCMAKE_INSTALL_PREFIX={}", self.install_prefix),
            format!("-DCMAKE_BUILD_TYPE={}", self.variant.build_type()),
            format!("-DCMAKE_CXX_FLAGS={}", cxxflags.join(" ")),
        ];
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

/// Full configure argument list for a variant, excluding the source directory.
pub fn tool_arguments(toolchain: &Toolchain, flags: &VariantFlags) -> Vec<String> {
    let mut args = toolchain.common_args();
    args.extend(flags.args(toolchain));
    args
}
