//! Shared fixtures for integration tests.
//!
//! `MemoryUnitOfWork` keeps every table in a mutex-guarded map and mimics
//! the database stores: missing rows on update or delete are not found,
//! user names are unique and ids are assigned in insertion order.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use car_rental_api::config::Config;
use car_rental_api::domain::{
    Caller, Car, CarDetails, CreateUser, NewPayment, NewReservation, NewReview, NewUser, Payment,
    Reservation, Review, User, UserRole,
};
use car_rental_api::errors::{AppError, AppResult};
use car_rental_api::infra::{
    CarRepository, PaymentRepository, ReservationRepository, ReviewRepository, UnitOfWork,
    UserRepository,
};
use car_rental_api::services::{ServiceContainer, Services};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

pub fn test_config() -> Config {
    Config::new("postgres://unused/test", TEST_SECRET).expect("test config")
}

/// Rows of one table plus the next id to hand out
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn replace(&mut self, id: i32, row: T, entity: &str) -> AppResult<T> {
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row.clone();
                Ok(row)
            }
            None => Err(AppError::not_found(entity)),
        }
    }

    fn remove(&mut self, id: i32, entity: &str) -> AppResult<()> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(entity))
    }

    fn filtered(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| keep(row)).cloned().collect()
    }
}

fn lock<T>(table: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct MemoryUsers(Mutex<Table<User>>);
pub struct MemoryCars(Mutex<Table<Car>>);
pub struct MemoryReservations(Mutex<Table<Reservation>>);
pub struct MemoryReviews(Mutex<Table<Review>>);
pub struct MemoryPayments(Mutex<Table<Payment>>);

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(lock(&self.0).get(id))
    }

    async fn find_by_user_name(&self, user_name: &str) -> AppResult<Option<User>> {
        Ok(lock(&self.0)
            .filtered(|u| u.user_name == user_name)
            .into_iter()
            .next())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut table = lock(&self.0);
        if table.rows.values().any(|u| u.user_name == user.user_name) {
            return Err(AppError::conflict("User name"));
        }
        let now = Utc::now();
        Ok(table.insert_with(|id| User {
            id,
            user_name: user.user_name,
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            role: user.role,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut table = lock(&self.0);
        if table
            .rows
            .values()
            .any(|u| u.user_name == user.user_name && u.id != user.id)
        {
            return Err(AppError::conflict("User name"));
        }
        let id = user.id;
        let updated = User {
            updated_at: Utc::now(),
            ..user
        };
        table.replace(id, updated, "User")
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        lock(&self.0).remove(id, "User")
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(lock(&self.0).filtered(|_| true))
    }
}

#[async_trait]
impl CarRepository for MemoryCars {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Car>> {
        Ok(lock(&self.0).get(id))
    }

    async fn create(&self, car: CarDetails) -> AppResult<Car> {
        Ok(lock(&self.0).insert_with(|id| Car::from_details(id, car)))
    }

    async fn update(&self, car: Car) -> AppResult<Car> {
        let id = car.id;
        lock(&self.0).replace(id, car, "Car")
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        lock(&self.0).remove(id, "Car")
    }

    async fn list(&self) -> AppResult<Vec<Car>> {
        Ok(lock(&self.0).filtered(|_| true))
    }
}

#[async_trait]
impl ReservationRepository for MemoryReservations {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Reservation>> {
        Ok(lock(&self.0).get(id))
    }

    async fn list(&self) -> AppResult<Vec<Reservation>> {
        Ok(lock(&self.0).filtered(|_| true))
    }

    async fn list_by_car(&self, car_id: i32) -> AppResult<Vec<Reservation>> {
        Ok(lock(&self.0).filtered(|r| r.car_id == car_id))
    }

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Reservation>> {
        Ok(lock(&self.0).filtered(|r| r.user_id == user_id))
    }

    async fn create(&self, reservation: NewReservation) -> AppResult<Reservation> {
        Ok(lock(&self.0).insert_with(|id| Reservation {
            id,
            user_id: reservation.user_id,
            car_id: reservation.car_id,
            pickup_date: reservation.pickup_date,
            dropoff_date: reservation.dropoff_date,
            total_price: reservation.total_price,
            status: reservation.status,
            created_at: Utc::now(),
        }))
    }

    async fn update(&self, reservation: Reservation) -> AppResult<Reservation> {
        let mut table = lock(&self.0);
        let created_at = table
            .get(reservation.id)
            .map(|stored| stored.created_at)
            .ok_or_else(|| AppError::not_found("Reservation"))?;
        let id = reservation.id;
        table.replace(
            id,
            Reservation {
                created_at,
                ..reservation
            },
            "Reservation",
        )
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        lock(&self.0).remove(id, "Reservation")
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviews {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>> {
        Ok(lock(&self.0).get(id))
    }

    async fn list(&self) -> AppResult<Vec<Review>> {
        Ok(lock(&self.0).filtered(|_| true))
    }

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Review>> {
        Ok(lock(&self.0).filtered(|r| r.user_id == user_id))
    }

    async fn create(&self, review: NewReview) -> AppResult<Review> {
        Ok(lock(&self.0).insert_with(|id| Review {
            id,
            user_id: review.user_id,
            rating: review.rating,
            content: review.content,
            created_at: Utc::now(),
        }))
    }

    async fn update(&self, review: Review) -> AppResult<Review> {
        let id = review.id;
        lock(&self.0).replace(id, review, "Review")
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        lock(&self.0).remove(id, "Review")
    }
}

#[async_trait]
impl PaymentRepository for MemoryPayments {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Payment>> {
        Ok(lock(&self.0).get(id))
    }

    async fn list(&self) -> AppResult<Vec<Payment>> {
        Ok(lock(&self.0).filtered(|_| true))
    }

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Payment>> {
        Ok(lock(&self.0).filtered(|p| p.user_id == user_id))
    }

    async fn create(&self, payment: NewPayment) -> AppResult<Payment> {
        Ok(lock(&self.0).insert_with(|id| Payment {
            id,
            user_id: payment.user_id,
            reservation_id: payment.reservation_id,
            amount: payment.amount,
            payment_method: payment.payment_method,
            paid_at: payment.paid_at,
        }))
    }

    async fn update(&self, payment: Payment) -> AppResult<Payment> {
        let id = payment.id;
        lock(&self.0).replace(id, payment, "Payment")
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        lock(&self.0).remove(id, "Payment")
    }
}

/// In-memory stand-in for the database-backed unit of work
pub struct MemoryUnitOfWork {
    users: Arc<MemoryUsers>,
    cars: Arc<MemoryCars>,
    reservations: Arc<MemoryReservations>,
    reviews: Arc<MemoryReviews>,
    payments: Arc<MemoryPayments>,
}

impl Default for MemoryUnitOfWork {
    fn default() -> Self {
        Self {
            users: Arc::new(MemoryUsers(Mutex::new(Table::new()))),
            cars: Arc::new(MemoryCars(Mutex::new(Table::new()))),
            reservations: Arc::new(MemoryReservations(Mutex::new(Table::new()))),
            reviews: Arc::new(MemoryReviews(Mutex::new(Table::new()))),
            payments: Arc::new(MemoryPayments(Mutex::new(Table::new()))),
        }
    }
}

impl UnitOfWork for MemoryUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn cars(&self) -> Arc<dyn CarRepository> {
        self.cars.clone()
    }

    fn reservations(&self) -> Arc<dyn ReservationRepository> {
        self.reservations.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.reviews.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payments.clone()
    }
}

/// Services wired to a fresh in-memory store
pub fn memory_services() -> Services {
    Services::from_unit_of_work(Arc::new(MemoryUnitOfWork::default()), test_config())
}

pub fn user_request(user_name: &str, role: Option<UserRole>) -> CreateUser {
    CreateUser {
        user_name: user_name.to_string(),
        email: format!("{}@example.com", user_name),
        password: "Password123!".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        phone_number: None,
        role,
    }
}

/// Seed a user directly through the service layer.
pub async fn seed_user(services: &Services, user_name: &str, role: UserRole) -> User {
    services
        .users()
        .add_user(user_request(user_name, Some(role)), Caller::System)
        .await
        .expect("seed user")
}

pub fn car_details(make: &str, daily_rate: f64) -> CarDetails {
    CarDetails {
        make: make.to_string(),
        model: "Model".to_string(),
        year: 2022,
        daily_rate,
        location: Some("Downtown".to_string()),
        available: true,
    }
}
