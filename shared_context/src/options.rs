/// The highest pipeline stage a CLI invocation should run, one variant per
/// mutually-exclusive stage flag plus `File`, the default "run everything
/// and emit assembly" mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lex,
    Parse,
    Semantic,
    Tac,
    CodeGen,
    File,
}

/// Target instruction set architecture, selected with `-m/--machine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Machine {
    X86_64,
    Aarch64,
}

impl Machine {
    pub fn parse(s: &str) -> Option<Machine> {
        match s {
            "x86_64" | "amd64" => Some(Machine::X86_64),
            "aarch64" | "arm64" => Some(Machine::Aarch64),
            _ => None,
        }
    }
}

/// Host OS, detected once at startup and threaded into the emitter; it
/// affects only symbol-prefixing conventions and the trailing section
/// directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    MacOs,
    Linux,
    FreeBsd,
}

impl HostOs {
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            HostOs::MacOs
        } else if cfg!(target_os = "freebsd") {
            HostOs::FreeBsd
        } else {
            HostOs::Linux
        }
    }
}
