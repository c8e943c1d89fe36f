//! Client-side role classification.
//!
//! Roles only decide what the UI offers. The service re-checks every
//! privileged call on its own.

use crate::model::User;

/// Capability class derived from the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Anonymous,
    User,
    Staff,
    Admin,
}

impl Role {
    /// Staff and admins may review pending submissions.
    pub const fn can_review(self) -> bool {
        matches!(self, Self::Staff | Self::Admin)
    }

    /// Marking a user verified is admin-only.
    pub const fn can_verify(self) -> bool {
        matches!(self, Self::Admin)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::User => "user",
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// `admin` beats `staff` beats `user`.
pub const fn classify(user: &User) -> Role {
    if user.is_admin() {
        Role::Admin
    } else if user.is_staff() {
        Role::Staff
    } else {
        Role::User
    }
}

/// Like [`classify`], but an absent record is [`Role::Anonymous`].
pub fn classify_session(user: Option<&User>) -> Role {
    user.map_or(Role::Anonymous, classify)
}

/// Whether the Pending tab is offered at all.
pub fn show_pending(user: Option<&User>) -> bool {
    classify_session(user).can_review()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: Option<bool>, is_staff: Option<bool>) -> User {
        User {
            is_admin,
            is_staff,
            ..User::new(1, "octocat")
        }
    }

    #[test]
    fn admin_wins_over_staff() {
        assert_eq!(classify(&user(Some(true), Some(true))), Role::Admin);
        assert_eq!(classify(&user(Some(true), None)), Role::Admin);
    }

    #[test]
    fn staff_without_admin() {
        assert_eq!(classify(&user(Some(false), Some(true))), Role::Staff);
    }

    #[test]
    fn plain_user_when_flags_absent_or_false() {
        assert_eq!(classify(&user(None, None)), Role::User);
        assert_eq!(classify(&user(Some(false), Some(false))), Role::User);
    }

    #[test]
    fn no_session_is_anonymous() {
        assert_eq!(classify_session(None), Role::Anonymous);
        assert!(!show_pending(None));
    }

    #[test]
    fn admin_is_capability_superset_of_staff() {
        assert!(Role::Admin > Role::Staff);
        assert!(Role::Admin.can_review());
        assert!(Role::Staff.can_review());
        assert!(!Role::User.can_review());
    }

    #[test]
    fn only_admins_verify() {
        assert!(Role::Admin.can_verify());
        assert!(!Role::Staff.can_verify());
        assert!(!Role::User.can_verify());
        assert!(!Role::Anonymous.can_verify());
    }

    #[test]
    fn show_pending_matches_flags() {
        for (admin, staff) in [(false, false), (true, false), (false, true), (true, true)] {
            let u = user(Some(admin), Some(staff));
            assert_eq!(show_pending(Some(&u)), admin || staff);
        }
    }
}
