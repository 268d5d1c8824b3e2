//! Identity records shared by the session store, the router, and the
//! login client.
//!
//! These are the structures that come back from the tournament API's
//! login endpoint and get cached client-side. Nothing here is secret:
//! the password only ever lives inside a [`Credentials`] value on its way
//! to the server.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Opaque identifier the tournament API assigns to an account.
///
/// A newtype so a principal id can't be mixed up with a team or match id,
/// which are plain strings elsewhere in the API. `#[serde(transparent)]`
/// keeps it a bare JSON string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(pub String);

impl PrincipalId {
    /// Wraps any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the id is empty or only whitespace. Such a principal
    /// can't be cached.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The closed set of roles the console knows about.
///
/// The role decides which dashboard pages and sidebar links are visible.
/// It is serialized lowercase (`"admin"`, `"superadmin"`) to match the
/// tags the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Tournament organiser: creates tournaments, teams and matches.
    Admin,
    /// Team captain: manages the players of their own team.
    Captain,
    /// Match official: records live match events.
    Scorer,
    /// Platform operator: adds new admins.
    SuperAdmin,
}

impl Role {
    /// Every role, in the order the login form offers them.
    pub const ALL: [Role; 4] =
        [Role::Captain, Role::Scorer, Role::Admin, Role::SuperAdmin];

    /// The lowercase tag used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Captain => "captain",
            Self::Scorer => "scorer",
            Self::SuperAdmin => "superadmin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ProtocolError;

    /// Parses a role tag, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == tag)
            .ok_or_else(|| ProtocolError::UnknownRole(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Principal
// ---------------------------------------------------------------------------

/// The authenticated identity held client-side after a successful login.
///
/// Only `id` and `role` matter for authorization. `display_name` and
/// `email` are for rendering ("Signed in as ...").
///
/// Decoding goes through [`PrincipalWire`], which accepts the login
/// endpoint's spellings; serialization always writes the canonical field
/// names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PrincipalWire")]
pub struct Principal {
    /// Account id assigned by the API.
    pub id: PrincipalId,

    /// Role the account signed in as.
    pub role: Role,

    /// Human-readable name, if the API sent one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Contact email, if the API sent one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A principal as the API (or tab storage) spells it.
///
/// The API puts the account id in `uuid` and often also sends its own
/// database `id`, sometimes as a number. `uuid` wins when present; `id`
/// is used only without one, and any `id` value that isn't a string or
/// integer is ignored.
#[derive(Deserialize)]
struct PrincipalWire {
    #[serde(default)]
    uuid: Option<String>,
    #[serde(default)]
    id: Option<WireId>,
    role: Role,
    #[serde(default, alias = "name")]
    display_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Other(serde::de::IgnoredAny),
}

impl WireId {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            Self::Signed(n) => Some(n.to_string()),
            Self::Unsigned(n) => Some(n.to_string()),
            Self::Other(_) => None,
        }
    }
}

impl TryFrom<PrincipalWire> for Principal {
    type Error = String;

    fn try_from(wire: PrincipalWire) -> Result<Self, Self::Error> {
        let id = wire
            .uuid
            .filter(|uuid| !uuid.trim().is_empty())
            .or_else(|| wire.id.and_then(WireId::into_text))
            .ok_or_else(|| "principal has no usable `uuid` or `id`".to_string())?;
        Ok(Self {
            id: PrincipalId(id),
            role: wire.role,
            display_name: wire.display_name,
            email: wire.email,
        })
    }
}

impl Principal {
    /// Creates a principal with just the fields authorization needs.
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: PrincipalId::new(id),
            role,
            display_name: None,
            email: None,
        }
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Whether this principal signed in as one of `roles`.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

// ---------------------------------------------------------------------------
// Login request / rejection
// ---------------------------------------------------------------------------

/// What the login form submits.
///
/// The role is the user's selection in the form, forwarded as a claim.
/// The API decides whether the account actually holds it.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl Credentials {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
        }
    }
}

/// Hand-written so the password never reaches a log line.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Error body the login endpoint sends alongside a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRejection {
    /// Human-readable reason ("Invalid password", "User not found").
    #[serde(default)]
    pub message: Option<String>,
}
