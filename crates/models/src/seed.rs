//! Data every fresh process starts with. Mutations are lost on restart.

use crate::errors::ModelError;
use crate::record::Record;
use crate::ticket::{Priority, Ticket, TicketStatus, UserRef};
use crate::user::{Role, User};
use crate::Collection;

fn seed_user(id: &str, email: &str, password: &str, name: &str, role: Role) -> User {
    User {
        id: Some(id.to_string()),
        email: email.to_string(),
        password: password.to_string(),
        name: Some(name.to_string()),
        first_name: None,
        last_name: None,
        role: Some(role),
        token: None,
    }
}

pub fn users() -> Vec<User> {
    vec![
        seed_user("1", "admin@ticketmgt.com", "admin123", "Admin User", Role::Admin),
        seed_user("2", "user@ticketmgt.com", "user123", "Regular User", Role::User),
        seed_user("3", "demo@ticketmgt.com", "demo123", "Demo User", Role::User),
    ]
}

pub fn tickets() -> Vec<Ticket> {
    vec![Ticket {
        id: Some("2".to_string()),
        title: "Password Reset".to_string(),
        description: "Need to reset password for user account".to_string(),
        status: TicketStatus::InProgress,
        priority: Priority::Medium,
        user_id: UserRef::Number(3),
        created_at: Some("2024-01-14T14:20:00Z".to_string()),
    }]
}

/// Seed records for one collection.
pub fn records(collection: Collection) -> Result<Vec<Record>, ModelError> {
    match collection {
        Collection::Users => users().iter().map(User::to_record).collect(),
        Collection::Tickets => tickets().iter().map(Ticket::to_record).collect(),
    }
}
