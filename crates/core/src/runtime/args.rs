/// Tuning arguments handed to the application server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerArgs {
    /// Arguments given on the launcher's own command line, passed verbatim.
    UserSupplied(Vec<String>),
    /// Synthesized from environment-derived defaults.
    Defaults {
        workers: u32,
        event_loop: String,
        keep_alive: u32,
    },
}

impl ServerArgs {
    /// User arguments win whenever any were given; defaults are not merged in.
    pub fn select(cli_args: Vec<String>, workers: u32, event_loop: &str, keep_alive: u32) -> Self {
        if cli_args.is_empty() {
            ServerArgs::Defaults {
                workers,
                event_loop: event_loop.to_string(),
                keep_alive,
            }
        } else {
            ServerArgs::UserSupplied(cli_args)
        }
    }

    pub fn is_user_supplied(&self) -> bool {
        matches!(self, ServerArgs::UserSupplied(_))
    }

    pub fn to_args(&self) -> Vec<String> {
        match self {
            ServerArgs::UserSupplied(args) => args.clone(),
            ServerArgs::Defaults {
                workers,
                event_loop,
                keep_alive,
            } => vec![
                "--workers".into(),
                workers.to_string(),
                "--loop".into(),
                event_loop.clone(),
                "--timeout-keep-alive".into(),
                keep_alive.to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_cli_args() {
        let args = ServerArgs::select(vec![], 4, "uvloop", 65);
        assert!(!args.is_user_supplied());
        assert_eq!(
            args.to_args(),
            ["--workers", "4", "--loop", "uvloop", "--timeout-keep-alive", "65"]
        );
    }

    #[test]
    fn cli_args_pass_through_unmodified() {
        let cli = vec!["--workers".to_string(), "1".to_string(), "--reload".to_string()];
        let args = ServerArgs::select(cli.clone(), 4, "uvloop", 65);
        assert!(args.is_user_supplied());
        assert_eq!(args.to_args(), cli);
    }
}
