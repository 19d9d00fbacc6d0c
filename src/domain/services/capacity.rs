use std::collections::HashMap;
use serde::Serialize;
use crate::domain::models::ticket_type::TicketType;

/// A ticket type annotated with its read-time availability.
/// Remaining seats are computed from the stored quantity minus the number
/// of registrations, clamped at zero.
#[derive(Debug, Serialize, Clone)]
pub struct TicketAvailability {
    #[serde(flatten)]
    pub ticket_type: TicketType,
    pub registered_count: i64,
    pub remaining_tickets: i64,
}

#[derive(Debug, Serialize, Clone, Copy)]
pub struct EventCapacity {
    pub registered_count: i64,
    pub remaining_tickets: i64,
}

pub fn availability(types: Vec<TicketType>, counts: &HashMap<String, i64>) -> Vec<TicketAvailability> {
    types.into_iter()
        .map(|tt| {
            let registered = counts.get(&tt.id).copied().unwrap_or(0);
            let remaining = (tt.quantity - registered).max(0);
            TicketAvailability {
                ticket_type: tt,
                registered_count: registered,
                remaining_tickets: remaining,
            }
        })
        .collect()
}

/// Drops sold-out ticket types from a public listing.
pub fn open_types(types: Vec<TicketAvailability>) -> Vec<TicketAvailability> {
    types.into_iter().filter(|t| t.remaining_tickets > 0).collect()
}

pub fn event_capacity(types: &[TicketAvailability], registered_count: i64) -> EventCapacity {
    let total: i64 = types.iter().map(|t| t.ticket_type.quantity).sum();
    EventCapacity {
        registered_count,
        remaining_tickets: (total - registered_count).max(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tt(id: &str, quantity: i64) -> TicketType {
        TicketType::new("ev1".to_string(), id.to_string(), 10.0, quantity)
    }

    #[test]
    fn test_remaining_clamps_at_zero() {
        let t = tt("VIP", 2);
        let mut counts = HashMap::new();
        counts.insert(t.id.clone(), 5);

        let avail = availability(vec![t], &counts);
        assert_eq!(avail[0].registered_count, 5);
        assert_eq!(avail[0].remaining_tickets, 0);
    }

    #[test]
    fn test_sold_out_types_are_hidden() {
        let a = tt("Standard", 3);
        let b = tt("VIP", 1);
        let mut counts = HashMap::new();
        counts.insert(b.id.clone(), 1);

        let avail = open_types(availability(vec![a, b], &counts));
        assert_eq!(avail.len(), 1);
        assert_eq!(avail[0].ticket_type.name, "Standard");
        assert_eq!(avail[0].remaining_tickets, 3);
    }

    #[test]
    fn test_event_capacity_sums_all_types() {
        let a = tt("Standard", 10);
        let b = tt("VIP", 5);
        let counts = HashMap::new();

        let avail = availability(vec![a, b], &counts);
        let cap = event_capacity(&avail, 4);
        assert_eq!(cap.registered_count, 4);
        assert_eq!(cap.remaining_tickets, 11);
    }
}
