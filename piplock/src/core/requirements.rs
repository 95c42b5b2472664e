//! Requirement lists and freeze-output filtering.

/// Section holding requirements shared by every target.
pub const SECTION_COMMON: &str = "piplock:common";
/// Section holding development-only requirements.
pub const SECTION_DEV: &str = "piplock:dev";
/// Section holding production-only requirements.
pub const SECTION_PROD: &str = "piplock:prod";
/// Key under each section that lists requirement specifiers.
pub const REQS_KEY: &str = "reqs";

/// Packaging infrastructure that `pip freeze` reports but projects never pin.
pub const PACKAGING_LIBS: [&str; 5] = [
    "pkg-resources",
    "pip",
    "virtualenv",
    "setuptools",
    "distribute",
];

/// Optional sections to add on top of `common`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Targets {
    pub dev: bool,
    pub prod: bool,
}

/// Requirement lists declared in `setup.cfg`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    pub common: Vec<String>,
    pub dev: Vec<String>,
    pub prod: Vec<String>,
}

impl Configuration {
    /// `common`, then `dev` and `prod` when requested. Order is kept and
    /// duplicates are not removed.
    pub fn target_packages(&self, dev: bool, prod: bool) -> Vec<String> {
        let mut packages = self.common.clone();
        if dev {
            packages.extend(self.dev.iter().cloned());
        }
        if prod {
            packages.extend(self.prod.iter().cloned());
        }
        packages
    }
}

/// Split a `reqs` value into trimmed, non-empty specifiers.
pub fn parse_reqs(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop every freeze line that mentions packaging infrastructure.
///
/// Matching is by substring, not by package name: `mypip-extra==1` is
/// dropped because it contains `pip`. Surviving lines keep their order and
/// are joined with `\n` without a trailing newline.
pub fn remove_packaging_libs(freeze: &str) -> String {
    freeze
        .lines()
        .filter(|line| !PACKAGING_LIBS.iter().any(|lib| line.contains(lib)))
        .collect::<Vec<_>>()
        .join("\n")
}
