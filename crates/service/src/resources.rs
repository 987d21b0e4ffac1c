//! Per-collection rules layered on the generic CRUD contract.

use models::record::Record;
use models::ticket::{created_at_now, CREATED_AT_FIELD, USER_ID_FIELD};
use models::Collection;
use serde_json::Value;

use crate::storage::FieldFilter;

/// Query parameter accepted as a list filter, if the collection has one.
pub fn list_filter_field(collection: Collection) -> Option<&'static str> {
    match collection {
        Collection::Tickets => Some(USER_ID_FIELD),
        Collection::Users => None,
    }
}

/// Build the list filter from query parameters. Empty values do not filter.
pub fn list_filter<'a, I>(collection: Collection, query: I) -> Option<FieldFilter>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let field = list_filter_field(collection)?;
    query
        .into_iter()
        .find(|(k, v)| *k == field && !v.is_empty())
        .map(|(_, v)| FieldFilter::new(field, v))
}

/// Stamp fields the server owns on a freshly inserted record (after `id`).
pub fn stamp_server_fields(collection: Collection, record: &mut Record) {
    if collection == Collection::Tickets {
        record.insert(CREATED_AT_FIELD.to_string(), Value::String(created_at_now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_tickets_filter_by_user_id() {
        let q = [("userId", "3")];
        assert_eq!(list_filter(Collection::Tickets, q), Some(FieldFilter::new("userId", "3")));
        assert_eq!(list_filter(Collection::Users, q), None);
        assert_eq!(list_filter(Collection::Tickets, [("userId", "")]), None);
        assert_eq!(list_filter(Collection::Tickets, [("status", "open")]), None);
    }

    #[test]
    fn tickets_get_created_at_users_do_not() {
        let mut ticket = Record::new();
        stamp_server_fields(Collection::Tickets, &mut ticket);
        assert!(ticket.get(CREATED_AT_FIELD).and_then(Value::as_str).is_some());

        let mut user = Record::new();
        stamp_server_fields(Collection::Users, &mut user);
        assert!(user.is_empty());
    }
}
