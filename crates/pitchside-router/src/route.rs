//! The route table.

use std::fmt;
use std::str::FromStr;

use pitchside_protocol::Role;

use crate::{Access, RouteError};

const ADMIN: &[Role] = &[Role::Admin];
const CAPTAIN: &[Role] = &[Role::Captain];
const SCORER: &[Role] = &[Role::Scorer];
const SUPERADMIN: &[Role] = &[Role::SuperAdmin];

/// A view the console can show.
///
/// Public pages hang off `/`, the signed-in area off `/dashboard`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Tournaments,
    Team(String),
    LiveMatch,
    Matches,
    PointsTable,
    Login,
    Dashboard,
    AddTournament,
    AddTeam,
    AddPlayers,
    AddMatches,
    Scorer,
    MatchDetails(String),
    SuperAdmin,
}

impl Route {
    /// Resolves a URL path.
    ///
    /// Trailing slashes are ignored (`/dashboard/` is `/dashboard`).
    /// Query strings and fragments are not part of a path; strip them
    /// first.
    ///
    /// # Errors
    /// [`RouteError::UnknownPath`] when nothing is mounted there,
    /// including a parameterized route with an empty parameter.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let unknown = || RouteError::UnknownPath(path.to_string());

        let rest = path.strip_prefix('/').ok_or_else(unknown)?;
        let rest = rest.trim_end_matches('/');
        let segments: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };
        if segments.iter().any(|s| s.is_empty()) {
            return Err(unknown());
        }

        let route = match segments.as_slice() {
            [] => Self::Home,
            ["tournaments"] => Self::Tournaments,
            ["team", id] => Self::Team((*id).to_string()),
            ["live"] => Self::LiveMatch,
            ["matches"] => Self::Matches,
            ["pointstable"] => Self::PointsTable,
            ["login"] => Self::Login,
            ["dashboard"] => Self::Dashboard,
            ["dashboard", "addtournament"] => Self::AddTournament,
            ["dashboard", "addteam"] => Self::AddTeam,
            ["dashboard", "addplayers"] => Self::AddPlayers,
            ["dashboard", "addmatches"] => Self::AddMatches,
            ["dashboard", "scorer"] => Self::Scorer,
            ["dashboard", "match-details", id] => {
                Self::MatchDetails((*id).to_string())
            }
            ["dashboard", "superadmin"] => Self::SuperAdmin,
            _ => return Err(unknown()),
        };
        Ok(route)
    }

    /// The canonical path, the inverse of [`parse`](Self::parse).
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Tournaments => "/tournaments".to_string(),
            Self::Team(id) => format!("/team/{id}"),
            Self::LiveMatch => "/live".to_string(),
            Self::Matches => "/matches".to_string(),
            Self::PointsTable => "/pointstable".to_string(),
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::AddTournament => "/dashboard/addtournament".to_string(),
            Self::AddTeam => "/dashboard/addteam".to_string(),
            Self::AddPlayers => "/dashboard/addplayers".to_string(),
            Self::AddMatches => "/dashboard/addmatches".to_string(),
            Self::Scorer => "/dashboard/scorer".to_string(),
            Self::MatchDetails(id) => format!("/dashboard/match-details/{id}"),
            Self::SuperAdmin => "/dashboard/superadmin".to_string(),
        }
    }

    /// Who may see this route.
    pub fn access(&self) -> Access {
        match self {
            Self::Home
            | Self::Tournaments
            | Self::Team(_)
            | Self::LiveMatch
            | Self::Matches
            | Self::PointsTable => Access::Public,
            Self::Login => Access::Guest,
            Self::Dashboard => Access::SignedIn,
            Self::AddTournament | Self::AddTeam | Self::AddMatches => {
                Access::Roles(ADMIN)
            }
            Self::AddPlayers => Access::Roles(CAPTAIN),
            Self::Scorer | Self::MatchDetails(_) => Access::Roles(SCORER),
            Self::SuperAdmin => Access::Roles(SUPERADMIN),
        }
    }

    /// `true` for `/dashboard` and everything under it.
    pub fn is_dashboard(&self) -> bool {
        !matches!(
            self.access(),
            Access::Public | Access::Guest
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
