use serde::Serialize;

use navigator_lib::{LocationClass, LocationId, Route, RouteStatus};

/// Result of a `jumps` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JumpReport {
    pub from: LocationId,
    pub to: LocationId,
    pub jumps: usize,
    /// `None` when both endpoints are the same system and nothing was cached.
    pub status: Option<RouteStatus>,
}

impl JumpReport {
    pub fn new(from: LocationId, to: LocationId, jumps: usize, route: Option<&Route>) -> Self {
        Self {
            from,
            to,
            jumps,
            status: route.map(|route| route.status),
        }
    }

    pub fn to_text(&self) -> String {
        match self.status {
            Some(RouteStatus::Excluded) => format!("{} (wormhole endpoint)", self.jumps),
            Some(RouteStatus::Failed) => format!("{} (lookup failed)", self.jumps),
            _ => self.jumps.to_string(),
        }
    }
}

/// Result of a `classify` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassReport {
    pub name: String,
    pub class: LocationClass,
    pub excluded: bool,
}

impl ClassReport {
    pub fn new(name: &str) -> Self {
        let class = navigator_lib::classify(name);
        Self {
            name: name.to_string(),
            class,
            excluded: class == LocationClass::Wormhole,
        }
    }

    pub fn to_text(&self) -> &'static str {
        if self.excluded {
            "excluded"
        } else {
            "routable"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_lib::RouteKey;

    #[test]
    fn same_system_report_has_no_status() {
        let report = JumpReport::new(30000142, 30000142, 0, None);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["jumps"], 0);
        assert!(json["status"].is_null());
        assert_eq!(report.to_text(), "0");
    }

    #[test]
    fn excluded_report_is_annotated() {
        let route = Route::excluded(RouteKey::new(30000142, 31000005));
        let report = JumpReport::new(30000142, 31000005, 0, Some(&route));
        assert_eq!(report.to_text(), "0 (wormhole endpoint)");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "excluded");
    }

    #[test]
    fn class_report_for_wormhole() {
        let report = ClassReport::new("J123456");
        assert!(report.excluded);
        assert_eq!(report.to_text(), "excluded");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["class"], "wormhole");
    }
}
