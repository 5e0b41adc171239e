//! Reservations loaded together with the cars and users they point at.
//!
//! Entities are stored once per id and navigations are resolved by key,
//! so a reservation can reach its car and the car can reach back to every
//! loaded reservation without any owning cycle.

use std::collections::BTreeMap;

use super::{Car, Reservation, UserResponse};

/// Arena of loaded entities rooted at an ordered list of reservations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationGraph {
    reservations: Vec<Reservation>,
    cars: BTreeMap<i32, Car>,
    users: BTreeMap<i32, UserResponse>,
}

impl ReservationGraph {
    pub fn new(reservations: Vec<Reservation>) -> Self {
        let mut graph = Self::default();
        for reservation in reservations {
            graph.insert_reservation(reservation);
        }
        graph
    }

    pub fn with_car(mut self, car: Car) -> Self {
        self.insert_car(car);
        self
    }

    pub fn with_user(mut self, user: UserResponse) -> Self {
        self.insert_user(user);
        self
    }

    /// Add a reservation unless one with the same id is already loaded.
    pub fn insert_reservation(&mut self, reservation: Reservation) -> bool {
        if self.reservations.iter().any(|r| r.id == reservation.id) {
            return false;
        }
        self.reservations.push(reservation);
        true
    }

    pub fn insert_car(&mut self, car: Car) {
        self.cars.insert(car.id, car);
    }

    pub fn insert_user(&mut self, user: UserResponse) {
        self.users.insert(user.id, user);
    }

    /// Root reservations in load order
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn car(&self, id: i32) -> Option<&Car> {
        self.cars.get(&id)
    }

    pub fn user(&self, id: i32) -> Option<&UserResponse> {
        self.users.get(&id)
    }

    pub fn cars(&self) -> impl Iterator<Item = &Car> {
        self.cars.values()
    }

    pub fn users(&self) -> impl Iterator<Item = &UserResponse> {
        self.users.values()
    }

    /// Loaded reservations of one car, in load order
    pub fn car_reservations(&self, car_id: i32) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter().filter(move |r| r.car_id == car_id)
    }

    /// Loaded reservations of one user, in load order
    pub fn user_reservations(&self, user_id: i32) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter().filter(move |r| r.user_id == user_id)
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }
}
