use serde::Serialize;
use webui_deploy_core::Diagnostic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Warn,
    Fail,
}

impl Status {
    fn tag(self) -> &'static str {
        match self {
            Status::Ok => "[ok]",
            Status::Warn => "[warn]",
            Status::Fail => "[fail]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub status: Status,
    pub message: String,
}

/// Accumulated verification results, printed once at the end.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub checks: Vec<Check>,
}

impl Report {
    fn push(&mut self, status: Status, message: impl Into<String>) {
        self.checks.push(Check {
            status,
            message: message.into(),
        });
    }

    pub fn ok(&mut self, message: impl Into<String>) {
        self.push(Status::Ok, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Status::Warn, message);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.push(Status::Fail, message);
    }

    pub fn extend_diagnostics(&mut self, diagnostics: Vec<Diagnostic>) {
        for d in diagnostics {
            if d.is_warning() {
                self.warn(d.message);
            } else {
                self.ok(d.message);
            }
        }
    }

    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status == Status::Fail)
    }

    pub fn render_plain(&self) -> String {
        self.checks
            .iter()
            .map(|c| format!("{} {}", c.status.tag(), c.message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&serde_json::json!({
            "ok": !self.has_failures(),
            "checks": self.checks,
        }))
    }
}
