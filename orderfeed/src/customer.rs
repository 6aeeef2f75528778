use rand::{Rng, seq::IndexedRandom};
use serde::Serialize;

/// Display name and country flag pairing used to sample synthetic orders.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub struct Customer {
    pub name: &'static str,
    pub flag: &'static str,
}

impl Customer {
    const fn new(name: &'static str, flag: &'static str) -> Self {
        Self { name, flag }
    }

    /// Sample a [`Customer`] uniformly from [`CUSTOMERS`].
    pub fn sample<R>(rng: &mut R) -> &'static Customer
    where
        R: Rng + ?Sized,
    {
        // CUSTOMERS is non-empty, so choose always succeeds
        CUSTOMERS.choose(rng).unwrap_or(&CUSTOMERS[0])
    }

    /// Find a [`Customer`] by name & flag.
    pub fn find(name: &str, flag: &str) -> Option<&'static Customer> {
        CUSTOMERS
            .iter()
            .find(|customer| customer.name == name && customer.flag == flag)
    }
}

pub static CUSTOMERS: [Customer; 40] = [
    Customer::new("Sarah", "🇺🇸"),
    Customer::new("James", "🇬🇧"),
    Customer::new("Yuki", "🇯🇵"),
    Customer::new("Priya", "🇮🇳"),
    Customer::new("Mohammed", "🇦🇪"),
    Customer::new("Sofia", "🇪🇸"),
    Customer::new("Chen", "🇨🇳"),
    Customer::new("Anna", "🇩🇪"),
    Customer::new("Lucas", "🇧🇷"),
    Customer::new("Fatima", "🇲🇦"),
    Customer::new("Kim", "🇰🇷"),
    Customer::new("Olga", "🇺🇦"),
    Customer::new("Marco", "🇮🇹"),
    Customer::new("Aisha", "🇳🇬"),
    Customer::new("Erik", "🇸🇪"),
    Customer::new("Marie", "🇫🇷"),
    Customer::new("Raj", "🇮🇳"),
    Customer::new("Mei", "🇹🇼"),
    Customer::new("Carlos", "🇲🇽"),
    Customer::new("Anya", "🇷🇺"),
    Customer::new("Tariq", "🇵🇰"),
    Customer::new("Ingrid", "🇳🇴"),
    Customer::new("Kofi", "🇬🇭"),
    Customer::new("Liam", "🇮🇪"),
    Customer::new("Sakura", "🇯🇵"),
    Customer::new("Ahmed", "🇪🇬"),
    Customer::new("Nina", "🇵🇱"),
    Customer::new("Thabo", "🇿🇦"),
    Customer::new("Emma", "🇦🇺"),
    Customer::new("Arjun", "🇮🇳"),
    Customer::new("Sven", "🇩🇰"),
    Customer::new("Leila", "🇮🇷"),
    Customer::new("Mateo", "🇦🇷"),
    Customer::new("Hana", "🇨🇿"),
    Customer::new("Kwame", "🇬🇭"),
    Customer::new("Chloe", "🇨🇦"),
    Customer::new("Hiroshi", "🇯🇵"),
    Customer::new("Zara", "🇬🇧"),
    Customer::new("Dmitri", "🇷🇺"),
    Customer::new("Aaliyah", "🇸🇦"),
];
