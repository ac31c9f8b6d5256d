use crate::dispatch::{ArmTarget, DispatchModule, MatchArm, MatchLevel};

/// First line of every emitted dictionary.
const HEADER: &str = "//Generated file";

/// Renders a lowered dispatch module as target-language source.
pub trait Backend {
    /// Extension of the artifact file this backend produces.
    fn extension(&self) -> &'static str;
    fn render(&self, module: &DispatchModule) -> String;
}

/// Emits nested `match` expressions over the code's bytes, one arm per
/// label group, every level closed by a `_ => UNKNOWN` default.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustBackend;

impl Backend for RustBackend {
    fn extension(&self) -> &'static str {
        "rs"
    }

    fn render(&self, module: &DispatchModule) -> String {
        let mut out = SourceWriter::default();
        out.line(0, HEADER);
        out.blank();
        out.line(
            0,
            &format!("const UNKNOWN: &str = {};", quote(&module.default_label)),
        );
        out.blank();
        out.line(
            0,
            &format!(
                "pub const fn {}(wmi: &str) -> &'static str {{",
                module.fn_name
            ),
        );
        out.line(
            1,
            &format!("match wmi.as_bytes()[{}] {{", module.root.byte_index),
        );
        render_arms(&mut out, &module.root, 2);
        out.line(1, "}");
        out.line(0, "}");
        out.finish()
    }
}

fn render_arms(out: &mut SourceWriter, level: &MatchLevel, indent: usize) {
    for arm in &level.arms {
        let pattern = pattern_text(arm);
        match &arm.target {
            ArmTarget::Label(label) => {
                out.line(indent, &format!("{pattern} => {},", quote(label)));
            }
            ArmTarget::Descend(next) => {
                out.line(
                    indent,
                    &format!("{pattern} => match wmi.as_bytes()[{}] {{", next.byte_index),
                );
                render_arms(out, next, indent + 1);
                out.line(indent, "},");
            }
        }
    }
    out.line(indent, "_ => UNKNOWN,");
}

fn pattern_text(arm: &MatchArm) -> String {
    let alternatives: Vec<String> = arm
        .patterns
        .iter()
        .map(|symbol| format!("b'{symbol}'"))
        .collect();
    alternatives.join(" | ")
}

fn quote(label: &str) -> String {
    let mut quoted = String::with_capacity(label.len() + 2);
    quoted.push('"');
    for ch in label.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

#[derive(Default)]
struct SourceWriter {
    buf: String,
}

impl SourceWriter {
    fn line(&mut self, indent: usize, text: &str) {
        for _ in 0..indent {
            self.buf.push_str("    ");
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    fn blank(&mut self) {
        self.buf.push('\n');
    }

    fn finish(self) -> String {
        self.buf
    }
}
