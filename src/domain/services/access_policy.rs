//! Role-based access decisions.
//!
//! Every role check in the application goes through [`AccessPolicy::check`];
//! handlers and services never match on roles themselves.

use crate::domain::value_objects::Role;
use crate::shared::error::AppError;

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: i64, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }
}

/// Something a caller wants to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Book an appointment with the given trainer
    CreateAppointment { trainer_id: i64 },
    /// Approve or reject an appointment booked for the given member
    DecideAppointment { member_id: i64 },
    /// Cancel an appointment run by the given trainer
    CancelAppointment { trainer_id: i64 },
    /// Read an appointment between these two users
    ViewAppointment { member_id: i64, trainer_id: i64 },
    ManageCatalog,
    ListUsers,
    ManagePosts,
    ManageCache,
    /// Create an account carrying this role
    AssignRole(Role),
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied(&'static str),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }

    /// Turn a denial into `AppError::Forbidden`.
    pub fn require(self) -> Result<(), AppError> {
        match self {
            Access::Granted => Ok(()),
            Access::Denied(reason) => Err(AppError::Forbidden(reason.to_string())),
        }
    }
}

/// Stateless access policy.
pub struct AccessPolicy;

impl AccessPolicy {
    /// Decide whether `actor` may exercise `capability`.
    pub fn check(actor: &Actor, capability: Capability) -> Access {
        use Capability::*;

        match (actor.role, capability) {
            // Only the booked member decides; admins get no override here.
            (Role::Member, DecideAppointment { member_id }) => {
                if member_id == actor.user_id {
                    Access::Granted
                } else {
                    Access::Denied("You can only decide on your own appointments")
                }
            }
            (_, DecideAppointment { .. }) => {
                Access::Denied("Only the booked member can approve or reject an appointment")
            }

            (Role::Admin, _) => Access::Granted,

            (Role::Trainer, CreateAppointment { trainer_id }) => {
                if trainer_id == actor.user_id {
                    Access::Granted
                } else {
                    Access::Denied("Trainers can only create appointments for themselves")
                }
            }
            (Role::Member, CreateAppointment { .. }) => {
                Access::Denied("Only trainers and admins can create appointments")
            }

            (Role::Trainer, CancelAppointment { trainer_id }) => {
                if trainer_id == actor.user_id {
                    Access::Granted
                } else {
                    Access::Denied("You can only cancel your own appointments")
                }
            }
            (_, CancelAppointment { .. }) => {
                Access::Denied("Only trainers and admins can cancel appointments")
            }

            (Role::Trainer, ViewAppointment { trainer_id, .. }) if trainer_id == actor.user_id => {
                Access::Granted
            }
            (Role::Member, ViewAppointment { member_id, .. }) if member_id == actor.user_id => {
                Access::Granted
            }
            (_, ViewAppointment { .. }) => Access::Denied("Appointment belongs to someone else"),

            (Role::Trainer, ListUsers) => Access::Granted,

            (_, AssignRole(role)) => Self::assign_role(role),

            (_, ManageCatalog | ListUsers | ManagePosts | ManageCache) => {
                Access::Denied("Admin role required")
            }
        }
    }

    /// Like [`check`](Self::check), for operations that also accept anonymous callers.
    ///
    /// An anonymous caller only holds `AssignRole` for non-admin roles.
    pub fn check_optional(actor: Option<&Actor>, capability: Capability) -> Access {
        match (actor, capability) {
            (Some(actor), capability) => Self::check(actor, capability),
            (None, Capability::AssignRole(role)) => Self::assign_role(role),
            (None, _) => Access::Denied("Authentication required"),
        }
    }

    /// Whether the caller may see inactive gyms and services.
    pub fn sees_inactive(actor: Option<&Actor>) -> bool {
        actor.is_some_and(|a| a.role.is_admin())
    }

    /// Whether the caller may read private posts.
    pub fn sees_private_posts(actor: Option<&Actor>) -> bool {
        actor.is_some_and(|a| a.role.is_admin())
    }

    fn assign_role(role: Role) -> Access {
        if role.is_admin() {
            Access::Denied("Only admins can create admin accounts")
        } else {
            Access::Granted
        }
    }
}
