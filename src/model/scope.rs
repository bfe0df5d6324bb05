use serde::{Deserialize, Serialize};

/// Role attached to an authenticated caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerRole {
    /// May read statistics across every district.
    Administrator,
    /// District staff maintaining dossiers and claims.
    Registrar,
    /// Field staff with read access to their own district.
    Agent,
}

/// Identity of the user a statistics request is computed for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Caller {
    pub user_id: i32,
    pub role: CallerRole,
    pub district_id: Option<i32>,
}

/// Visibility boundary applied to every statistics query.
///
/// A scope is resolved once per request from the caller and passed down to
/// the data layer, so no query ever decides tenancy on its own.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Scope {
    unrestricted: bool,
    district_id: Option<i32>,
}

impl Scope {
    /// Scope that sees every district.
    pub fn unrestricted() -> Self {
        Self {
            unrestricted: true,
            district_id: None,
        }
    }

    /// Scope limited to a single district.
    pub fn district(district_id: i32) -> Self {
        Self {
            unrestricted: false,
            district_id: Some(district_id),
        }
    }

    /// Maps a caller to their visibility boundary.
    ///
    /// Administrators see everything. Every other role is bound to their
    /// district; a non-administrator without a district assignment gets a
    /// scope that matches no rows at all rather than a widened one.
    pub fn resolve(caller: &Caller) -> Self {
        match caller.role {
            CallerRole::Administrator => Self::unrestricted(),
            CallerRole::Registrar | CallerRole::Agent => Self {
                unrestricted: false,
                district_id: caller.district_id,
            },
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.unrestricted
    }

    /// District filter to apply, `None` when unrestricted.
    pub fn district_id(&self) -> Option<i32> {
        if self.unrestricted {
            None
        } else {
            self.district_id
        }
    }

    /// Stable text form used to namespace cache keys per tenant.
    pub fn key_segment(&self) -> String {
        if self.unrestricted {
            "global".to_string()
        } else {
            match self.district_id {
                Some(id) => format!("district:{id}"),
                None => "district:unassigned".to_string(),
            }
        }
    }
}
