//! Entity records served by the API. Each implements [`crate::Resource`].

mod gym;
mod location;
mod member;
mod member_status;
mod plan;
mod user;
mod visit;

pub use gym::Gym;
pub use location::Location;
pub use member::Member;
pub use member_status::MemberStatus;
pub use plan::Plan;
pub use user::User;
pub use visit::Visit;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;
    use std::collections::HashSet;

    fn check<T: Resource>(sample: T) {
        let def = T::TABLE;
        let columns: HashSet<&str> = def.columns.iter().copied().collect();
        assert_eq!(columns.len(), def.columns.len(), "{}: duplicate column", def.table);
        assert_eq!(def.columns[0], def.id_column, "{}: id column first", def.table);

        let mut seen = HashSet::new();
        for name in T::SCHEMA.names() {
            assert!(seen.insert(name), "{}: duplicate schema field {}", def.table, name);
            assert!(columns.contains(name), "{}: schema field {} is not a column", def.table, name);
        }
        assert!(T::SCHEMA.get(def.id_column).is_some(), "{}: id not filterable", def.table);

        for (col, _) in sample.values() {
            assert!(columns.contains(col), "{}: written column {} unknown", def.table, col);
            assert_ne!(col, def.id_column, "{}: id must not be written", def.table);
            assert_ne!(col, "created_at", "{}: created_at is server-assigned", def.table);
        }
        for col in def.defaulted {
            assert!(columns.contains(col));
        }
    }

    #[test]
    fn table_definitions_are_consistent() {
        check(User {
            user_id: 0,
            email: "a@b.co".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            is_admin: false,
            created_at: None,
        });
        check(MemberStatus {
            status_id: 0,
            name: "active".into(),
            description: None,
        });
        check(Plan {
            plan_id: 0,
            name: "Monthly".into(),
            description: None,
            price_cents: 2999,
            duration_months: 1,
            is_active: true,
            created_at: None,
        });
        check(Gym {
            gym_id: 0,
            name: "Iron Temple".into(),
            email: None,
            phone: None,
            created_at: None,
        });
        check(Location {
            location_id: 0,
            gym_id: 1,
            name: "Downtown".into(),
            address: "1 Main St".into(),
            city: "Springfield".into(),
            created_at: None,
        });
        check(Member {
            member_id: 0,
            user_id: None,
            email: "m@x.com".into(),
            first_name: "M".into(),
            last_name: "X".into(),
            status_id: 1,
            plan_id: None,
            home_location_id: None,
            joined_at: None,
            created_at: None,
        });
        check(Visit {
            visit_id: 0,
            member_id: 1,
            location_id: 1,
            checked_in_at: None,
            created_at: None,
        });
    }

    #[test]
    fn paths_are_unique() {
        let paths = [
            User::PATH,
            MemberStatus::PATH,
            Plan::PATH,
            Gym::PATH,
            Location::PATH,
            Member::PATH,
            Visit::PATH,
        ];
        let unique: HashSet<_> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
    }

    #[test]
    fn create_body_without_id_deserializes() {
        let m: Member = serde_json::from_value(serde_json::json!({
            "email": "test@x.com",
            "first_name": "Test",
            "last_name": "Member",
            "status_id": 1
        }))
        .unwrap();
        assert_eq!(m.member_id, 0);
        assert!(m.joined_at.is_none());

        let p: Plan = serde_json::from_value(serde_json::json!({
            "name": "Annual",
            "price_cents": 29900,
            "duration_months": 12
        }))
        .unwrap();
        assert!(p.is_active);
    }

    #[test]
    fn validation_rules() {
        let mut u = User {
            user_id: 0,
            email: "not-an-email".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            is_admin: false,
            created_at: None,
        };
        assert!(u.validate().is_err());
        u.email = "a@b.co".into();
        assert!(u.validate().is_ok());

        let plan = Plan {
            plan_id: 0,
            name: "Free".into(),
            description: None,
            price_cents: 0,
            duration_months: 0,
            is_active: true,
            created_at: None,
        };
        assert!(plan.validate().is_err());
    }
}
