//! Mapping of `module/feature` route parameters to dashboard screens.

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::models::Dataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Grants,
    Documents,
    Fundraising,
    Hr,
    Admin,
}

impl Module {
    pub fn slug(&self) -> &'static str {
        match self {
            Module::Grants => "grants",
            Module::Documents => "documents",
            Module::Fundraising => "fundraising",
            Module::Hr => "hr",
            Module::Admin => "admin",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Module::Grants => "Grants",
            Module::Documents => "Documents",
            Module::Fundraising => "Fundraising",
            Module::Hr => "HR",
            Module::Admin => "Admin",
        }
    }

    fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "grants" => Some(Module::Grants),
            "documents" => Some(Module::Documents),
            "fundraising" => Some(Module::Fundraising),
            "hr" => Some(Module::Hr),
            "admin" => Some(Module::Admin),
            _ => None,
        }
    }
}

/// One dashboard screen. Order of `ALL` is tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    GrantPortfolio,
    GrantArchive,
    Compliance,
    Opportunities,
    Employees,
    Onboarding,
    Exits,
    References,
    Users,
}

impl Screen {
    pub const ALL: [Screen; 9] = [
        Screen::GrantPortfolio,
        Screen::GrantArchive,
        Screen::Compliance,
        Screen::Opportunities,
        Screen::Employees,
        Screen::Onboarding,
        Screen::Exits,
        Screen::References,
        Screen::Users,
    ];

    pub fn module(&self) -> Module {
        match self {
            Screen::GrantPortfolio | Screen::GrantArchive => Module::Grants,
            Screen::Compliance => Module::Documents,
            Screen::Opportunities => Module::Fundraising,
            Screen::Employees | Screen::Onboarding | Screen::Exits | Screen::References => {
                Module::Hr
            }
            Screen::Users => Module::Admin,
        }
    }

    pub fn feature(&self) -> &'static str {
        match self {
            Screen::GrantPortfolio => "portfolio",
            Screen::GrantArchive => "archive",
            Screen::Compliance => "compliance",
            Screen::Opportunities => "opportunities",
            Screen::Employees => "employees",
            Screen::Onboarding => "onboarding",
            Screen::Exits => "exits",
            Screen::References => "references",
            Screen::Users => "users",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::GrantPortfolio => "Portfolio",
            Screen::GrantArchive => "Archive",
            Screen::Compliance => "Compliance",
            Screen::Opportunities => "Pipeline",
            Screen::Employees => "Employees",
            Screen::Onboarding => "Onboarding",
            Screen::Exits => "Exits",
            Screen::References => "References",
            Screen::Users => "Users",
        }
    }

    /// Backing collection. Portfolio and archive share the grants dataset.
    pub fn dataset(&self) -> Dataset {
        match self {
            Screen::GrantPortfolio | Screen::GrantArchive => Dataset::Grants,
            Screen::Compliance => Dataset::ComplianceDocuments,
            Screen::Opportunities => Dataset::Opportunities,
            Screen::Employees => Dataset::Employees,
            Screen::Onboarding => Dataset::OnboardingTasks,
            Screen::Exits => Dataset::Exits,
            Screen::References => Dataset::ReferenceChecks,
            Screen::Users => Dataset::Users,
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Resolve `module/feature`. A bare module picks its first screen.
    pub fn parse(route: &str) -> CoreResult<Self> {
        let route = route.trim().trim_matches('/');
        let unknown = || CoreError::UnknownRoute(route.to_string());

        let (module_slug, feature) = match route.split_once('/') {
            Some((m, f)) => (m, Some(f)),
            None => (route, None),
        };
        let module = Module::from_slug(module_slug).ok_or_else(unknown)?;
        let mut screens = Self::ALL.iter().copied().filter(|s| s.module() == module);

        match feature {
            None => screens.next().ok_or_else(unknown),
            Some(f) => screens.find(|s| s.feature() == f).ok_or_else(unknown),
        }
    }

    pub fn path(&self) -> String {
        format!("{}/{}", self.module().slug(), self.feature())
    }
}

impl FromStr for Screen {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::parse(s)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} › {}", self.module().title(), self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_path_round_trips() {
        for screen in Screen::ALL {
            assert_eq!(Screen::parse(&screen.path()), Ok(screen));
        }
    }

    #[test]
    fn test_bare_module_resolves_to_first_feature() {
        assert_eq!(Screen::parse("hr"), Ok(Screen::Employees));
        assert_eq!(Screen::parse("/grants/"), Ok(Screen::GrantPortfolio));
        assert_eq!("documents".parse::<Screen>(), Ok(Screen::Compliance));
    }

    #[test]
    fn test_unknown_routes() {
        assert_eq!(
            Screen::parse("payroll/runs"),
            Err(CoreError::UnknownRoute("payroll/runs".to_string()))
        );
        assert_eq!(
            Screen::parse("hr/payroll"),
            Err(CoreError::UnknownRoute("hr/payroll".to_string()))
        );
        assert!(Screen::parse("").is_err());
    }

    #[test]
    fn test_tab_cycling_wraps() {
        assert_eq!(Screen::Users.next(), Screen::GrantPortfolio);
        assert_eq!(Screen::GrantPortfolio.prev(), Screen::Users);
        assert_eq!(Screen::from_index(2), Some(Screen::Compliance));
        assert_eq!(Screen::from_index(9), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Screen::References.to_string(), "HR › References");
        assert_eq!(Screen::GrantArchive.dataset(), Dataset::Grants);
    }
}
