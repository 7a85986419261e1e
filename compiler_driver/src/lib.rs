//! Library half of the `axc` driver: every stage-wiring function `main.rs`
//! dispatches to, exposed here so end-to-end tests can drive the full
//! pipeline without going through a subprocess.

pub mod error;
pub mod files;
pub mod stages;

#[cfg(test)]
mod tests {
    use super::stages;
    use std::fs;

    /// Writes `source` to a uniquely-named `.c` file in the system temp
    /// directory and returns its path and bare file name; the caller is
    /// responsible for removing it (and whatever sibling file a stage
    /// produced from it).
    fn write_temp_source(name: &str, source: &str) -> (String, String) {
        let file_name = format!("axc_test_{name}_{}.c", std::process::id());
        let path = std::env::temp_dir().join(&file_name);
        fs::write(&path, source).expect("failed to write fixture source");
        (path.to_string_lossy().into_owned(), file_name)
    }

    fn cleanup(paths: &[&str]) {
        for path in paths {
            let _ = fs::remove_file(path);
        }
    }

    /// Scenario 1: a single constant return compiles to the expected
    /// three-instruction epilogue-free body.
    #[test]
    fn emits_assembly_for_constant_return() {
        let (src_path, file_name) = write_temp_source("const_return", "int main(void){return 2;}");
        let result = stages::emit_assembly(&src_path, &file_name, shared_context::options::Machine::X86_64);

        let asm_path = result.expect("pipeline should succeed on a valid program");
        let asm = fs::read_to_string(&asm_path).expect("assembly file should exist");
        cleanup(&[&src_path, &asm_path]);

        assert!(asm.contains("movl\t$2, %eax"), "asm was:\n{asm}");
        assert!(asm.contains("ret"));
    }

    /// Scenario 4: redeclaring a variable in the same scope is a semantic
    /// error, surfaced through `AxcError::Semantic`'s `Display`.
    #[test]
    fn rejects_duplicate_declaration() {
        let (src_path, file_name) = write_temp_source(
            "dup_decl",
            "int main(void){int a=1; int a=2; return a;}",
        );
        let result = stages::emit_assembly(&src_path, &file_name, shared_context::options::Machine::X86_64);
        cleanup(&[&src_path]);

        let err = result.expect_err("duplicate declaration must be rejected");
        assert!(matches!(err, crate::error::AxcError::Semantic(_)));
        assert!(err.to_string().contains("semantic error"));
    }

    /// Scenario 5: a `goto` to a label that is never defined in the same
    /// function is a semantic error, not a parse error.
    #[test]
    fn rejects_goto_to_undefined_label() {
        let (src_path, file_name) = write_temp_source("bad_goto", "int main(void){ goto L; return 0; }");
        let result = stages::emit_assembly(&src_path, &file_name, shared_context::options::Machine::X86_64);
        cleanup(&[&src_path]);

        let err = result.expect_err("undefined label must be rejected");
        assert!(matches!(err, crate::error::AxcError::Semantic(_)));
    }

    /// Scenario 6: a `for` loop lowers to the three-label shape TAC
    /// generation uses for every loop construct.
    #[test]
    fn for_loop_lowers_to_labeled_tac() {
        let (src_path, file_name) = write_temp_source(
            "for_loop",
            "int main(void){int x=0; for(int i=0;i<3;i=i+1){x=x+i;} return x;}",
        );
        let tacky_result = stages::tacky_stage(&src_path, &file_name, true);
        cleanup(&[&src_path]);

        assert!(tacky_result.is_ok());
    }

    /// A program whose last statement isn't `return` still produces valid
    /// assembly: the TAC generator appends an implicit `return 0`.
    #[test]
    fn validate_stage_accepts_well_formed_program() {
        let (src_path, file_name) = write_temp_source("validate_ok", "int main(void){return 1-2-3;}");
        let result = stages::validate_stage(&src_path, &file_name, true);
        cleanup(&[&src_path]);

        assert!(result.is_ok());
    }
}
