/// Failure while building GPU pipelines at startup.
///
/// None of these are recoverable; the application boundary logs them and
/// terminates.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to compile shader program `{program}`:\n{log}")]
    Compile { program: &'static str, log: String },

    #[error("failed to link pipeline for shader program `{program}`:\n{log}")]
    Link { program: &'static str, log: String },

    #[error("shader program `{program}` declares no uniform named `{name}`")]
    MissingUniform {
        program: &'static str,
        name: &'static str,
    },

    #[error("shader program `{program}` declares no attribute named `{name}`")]
    MissingAttribute {
        program: &'static str,
        name: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_uniform_names_program_and_uniform() {
        let err = SetupError::MissingUniform {
            program: "stars",
            name: "star_density",
        };
        assert_eq!(
            err.to_string(),
            "shader program `stars` declares no uniform named `star_density`"
        );
    }

    #[test]
    fn compile_error_carries_log() {
        let err = SetupError::Compile {
            program: "lines",
            log: "expected `;`".to_string(),
        };
        assert!(err.to_string().ends_with("expected `;`"));
    }
}
