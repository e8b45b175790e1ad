#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Operational,
    Development,
    Maintenance,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Operational => "operational",
            ProjectStatus::Development => "development",
            ProjectStatus::Maintenance => "maintenance",
        }
    }
}

/// A portfolio entry shown in the projects view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub domain: Option<&'static str>,
    pub tech_stack: &'static [&'static str],
    pub status: ProjectStatus,
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: "1",
        name: "Digital8 OS",
        description: "High-performance task management with Linear-inspired UX",
        domain: Some("os.digital8.ca"),
        tech_stack: &["Rust", "ratatui", "crossterm", "SQLite", "serde"],
        status: ProjectStatus::Operational,
    },
    Project {
        id: "2",
        name: "TravelPoint Planner",
        description: "AI-powered travel planning platform",
        domain: Some("planner.travelpoint.ca"),
        tech_stack: &["React", "TypeScript", "Vite", "Zustand", "Framer Motion"],
        status: ProjectStatus::Operational,
    },
    Project {
        id: "3",
        name: "Digital8 Corporate",
        description: "Corporate website with integrated brand identity",
        domain: Some("digital8.ca"),
        tech_stack: &["Next.js", "React", "TypeScript", "Tailwind CSS"],
        status: ProjectStatus::Operational,
    },
    Project {
        id: "4",
        name: "MyTravelPoint Agency",
        description: "Duda CMS commercial site extended with custom Next.js widgets \
                      for 100/100 SEO and zero blocking time",
        domain: Some("mytravelpoint.ca"),
        tech_stack: &["Next.js", "React", "TypeScript", "Duda CMS", "Tailwind CSS"],
        status: ProjectStatus::Operational,
    },
];

pub fn find_project(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|p| p.id == id)
}

/// Fixed start-up log shown under a project's details.
///
/// Most domains get the generic network check with their own host name
/// substituted; the CMS-backed agency site and the corporate site have
/// their own sequences.
pub fn boot_log(domain: Option<&str>) -> Vec<String> {
    const BOOT: &str = "[BOOT] Digital8 OS initialized.";
    match domain {
        Some("mytravelpoint.ca") => vec![
            BOOT.to_string(),
            "[SYS] Syncing with Duda CMS... SUCCESS.".to_string(),
            "[SYS] Loading AI Planner Module... SUCCESS.".to_string(),
        ],
        Some("digital8.ca") => vec![
            BOOT.to_string(),
            "[DNS] Connecting to digital8.ca... SUCCESS.".to_string(),
            "[SEC] SSL Certificate validated: SUCCESS.".to_string(),
        ],
        other => vec![
            BOOT.to_string(),
            format!(
                "[NET] Resolved {}... Status 200.",
                other.unwrap_or("planner.travelpoint.ca")
            ),
            "[SEC] OpenAI_API_KEY validated: SUCCESS.".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<&str> = PROJECTS.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), PROJECTS.len());
    }

    #[test]
    fn find_project_by_id() {
        assert_eq!(find_project("2").map(|p| p.name), Some("TravelPoint Planner"));
        assert!(find_project("99").is_none());
    }

    #[test]
    fn boot_log_is_per_domain() {
        let os = boot_log(Some("os.digital8.ca"));
        assert_eq!(os.len(), 3);
        assert_eq!(os[0], "[BOOT] Digital8 OS initialized.");
        assert_eq!(os[1], "[NET] Resolved os.digital8.ca... Status 200.");

        assert_eq!(boot_log(Some("digital8.ca"))[1], "[DNS] Connecting to digital8.ca... SUCCESS.");
        assert_eq!(boot_log(Some("mytravelpoint.ca"))[1], "[SYS] Syncing with Duda CMS... SUCCESS.");
        assert_eq!(boot_log(None)[1], "[NET] Resolved planner.travelpoint.ca... Status 200.");
    }

    #[test]
    fn every_project_has_a_boot_log() {
        for project in PROJECTS {
            let log = boot_log(project.domain);
            assert!(log.iter().all(|line| line.starts_with('[')), "{}", project.name);
        }
    }
}
