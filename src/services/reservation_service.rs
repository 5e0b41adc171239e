//! Reservation service - Booking use cases.
//!
//! Prices are always derived from the car's daily rate, never taken from
//! the request. Lookups of a car's or user's reservations return a
//! [`ReservationGraph`] so callers can render the navigations both ways.

use async_trait::async_trait;
use std::sync::Arc;

use super::container::parallel;
use crate::domain::{
    Car, CreateReservation, NewReservation, Reservation, ReservationGraph, ReservationStatus,
    UpdateReservation, UserResponse,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait ReservationService: Send + Sync {
    async fn list_reservations(&self) -> AppResult<Vec<Reservation>>;

    async fn get_reservation(&self, id: i32) -> AppResult<Reservation>;

    /// The car with every reservation made for it.
    ///
    /// Fails with not-found when the car is missing or has no reservations.
    async fn reservations_for_car(&self, car_id: i32) -> AppResult<ReservationGraph>;

    /// The user with every reservation they made.
    ///
    /// Fails with not-found when the user is missing or has no reservations.
    async fn reservations_for_user(&self, user_id: i32) -> AppResult<ReservationGraph>;

    async fn add_reservation(&self, request: CreateReservation) -> AppResult<Reservation>;

    async fn update_reservation(&self, request: UpdateReservation) -> AppResult<Reservation>;

    async fn delete_reservation(&self, id: i32) -> AppResult<()>;
}

pub struct ReservationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReservationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Load the referenced user and car; either missing is a bad request.
    async fn referenced_car(&self, user_id: i32, car_id: i32) -> AppResult<Car> {
        let users = self.uow.users();
        let cars = self.uow.cars();
        let (user, car) = parallel::join2(users.find_by_id(user_id), cars.find_by_id(car_id)).await?;

        if user.is_none() {
            return Err(AppError::bad_request(format!("user {} does not exist", user_id)));
        }
        car.ok_or_else(|| AppError::bad_request(format!("car {} does not exist", car_id)))
    }
}

#[async_trait]
impl<U: UnitOfWork> ReservationService for ReservationManager<U> {
    async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
        self.uow.reservations().list().await
    }

    async fn get_reservation(&self, id: i32) -> AppResult<Reservation> {
        self.uow
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Reservation")
    }

    async fn reservations_for_car(&self, car_id: i32) -> AppResult<ReservationGraph> {
        let cars = self.uow.cars();
        let reservations = self.uow.reservations();
        let (car, reservations) =
            parallel::join2(cars.find_by_id(car_id), reservations.list_by_car(car_id)).await?;

        let car = car.ok_or_not_found("Car")?;
        if reservations.is_empty() {
            return Err(AppError::NotFound(
                "No reservations found for this car".to_string(),
            ));
        }

        Ok(ReservationGraph::new(reservations).with_car(car))
    }

    async fn reservations_for_user(&self, user_id: i32) -> AppResult<ReservationGraph> {
        let users = self.uow.users();
        let reservations = self.uow.reservations();
        let (user, reservations) =
            parallel::join2(users.find_by_id(user_id), reservations.list_by_user(user_id)).await?;

        let user = user.ok_or_not_found("User")?;
        if reservations.is_empty() {
            return Err(AppError::NotFound(
                "No reservations found for this user".to_string(),
            ));
        }

        Ok(ReservationGraph::new(reservations).with_user(UserResponse::from(user)))
    }

    async fn add_reservation(&self, request: CreateReservation) -> AppResult<Reservation> {
        let car = self.referenced_car(request.user_id, request.car_id).await?;

        let reservation = self
            .uow
            .reservations()
            .create(NewReservation {
                user_id: request.user_id,
                car_id: car.id,
                pickup_date: request.pickup_date,
                dropoff_date: request.dropoff_date,
                total_price: Reservation::quote(
                    car.daily_rate,
                    request.pickup_date,
                    request.dropoff_date,
                ),
                status: ReservationStatus::Pending,
            })
            .await?;

        tracing::info!(
            reservation_id = reservation.id,
            car_id = reservation.car_id,
            total_price = reservation.total_price,
            "Reservation created"
        );
        Ok(reservation)
    }

    async fn update_reservation(&self, request: UpdateReservation) -> AppResult<Reservation> {
        let stored = self.get_reservation(request.id).await?;
        let car = self.referenced_car(request.user_id, request.car_id).await?;

        self.uow
            .reservations()
            .update(Reservation {
                id: stored.id,
                user_id: request.user_id,
                car_id: car.id,
                pickup_date: request.pickup_date,
                dropoff_date: request.dropoff_date,
                total_price: Reservation::quote(
                    car.daily_rate,
                    request.pickup_date,
                    request.dropoff_date,
                ),
                status: request.status,
                created_at: stored.created_at,
            })
            .await
    }

    async fn delete_reservation(&self, id: i32) -> AppResult<()> {
        self.uow.reservations().delete(id).await?;
        tracing::info!(reservation_id = id, "Reservation deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::{User, UserRole};
    use crate::infra::{MockCarRepository, MockReservationRepository, MockUserRepository};
    use crate::services::testing::TestUnitOfWork;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    fn car(id: i32) -> Car {
        Car {
            id,
            make: "Ford".to_string(),
            model: "Focus".to_string(),
            year: 2020,
            daily_rate: 30.0,
            location: None,
            available: true,
        }
    }

    fn user(id: i32) -> User {
        User {
            id,
            user_name: "renter".to_string(),
            email: "renter@example.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Rita".to_string(),
            last_name: "Renter".to_string(),
            phone_number: None,
            role: UserRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn reservation(id: i32, car_id: i32, user_id: i32) -> Reservation {
        Reservation {
            id,
            user_id,
            car_id,
            pickup_date: date(1),
            dropoff_date: date(4),
            total_price: 90.0,
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    fn users_with(id: i32) -> MockUserRepository {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(|id| Ok(Some(user(id))));
        repo
    }

    fn cars_with(id: i32) -> MockCarRepository {
        let mut repo = MockCarRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(|id| Ok(Some(car(id))));
        repo
    }

    #[tokio::test]
    async fn test_reservations_for_car_builds_graph() {
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_list_by_car()
            .with(eq(7))
            .returning(|car_id| Ok(vec![reservation(1, car_id, 2), reservation(2, car_id, 3)]));

        let uow = TestUnitOfWork::default()
            .with_cars(cars_with(7))
            .with_reservations(reservations);
        let graph = ReservationManager::new(Arc::new(uow))
            .reservations_for_car(7)
            .await
            .unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.car(7), Some(&car(7)));
        assert_eq!(graph.car_reservations(7).count(), 2);
    }

    #[tokio::test]
    async fn test_reservations_for_missing_car() {
        let mut cars = MockCarRepository::new();
        cars.expect_find_by_id().returning(|_| Ok(None));
        let mut reservations = MockReservationRepository::new();
        reservations.expect_list_by_car().returning(|_| Ok(vec![]));

        let uow = TestUnitOfWork::default()
            .with_cars(cars)
            .with_reservations(reservations);
        let err = ReservationManager::new(Arc::new(uow))
            .reservations_for_car(7)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Car not found"));
    }

    #[tokio::test]
    async fn test_car_without_reservations_is_not_found() {
        let mut reservations = MockReservationRepository::new();
        reservations.expect_list_by_car().returning(|_| Ok(vec![]));

        let uow = TestUnitOfWork::default()
            .with_cars(cars_with(7))
            .with_reservations(reservations);
        let err = ReservationManager::new(Arc::new(uow))
            .reservations_for_car(7)
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::NotFound(ref m) if m == "No reservations found for this car")
        );
    }

    #[tokio::test]
    async fn test_reservations_for_user_includes_profile() {
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_list_by_user()
            .with(eq(3))
            .returning(|user_id| Ok(vec![reservation(5, 1, user_id)]));

        let uow = TestUnitOfWork::default()
            .with_users(users_with(3))
            .with_reservations(reservations);
        let graph = ReservationManager::new(Arc::new(uow))
            .reservations_for_user(3)
            .await
            .unwrap();

        assert_eq!(graph.user(3).map(|u| u.user_name.as_str()), Some("renter"));
        assert!(graph.car(1).is_none());
    }

    #[tokio::test]
    async fn test_add_reservation_prices_from_daily_rate() {
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_create()
            .withf(|new| new.total_price == 90.0 && new.status == ReservationStatus::Pending)
            .returning(|new| {
                Ok(Reservation {
                    id: 11,
                    user_id: new.user_id,
                    car_id: new.car_id,
                    pickup_date: new.pickup_date,
                    dropoff_date: new.dropoff_date,
                    total_price: new.total_price,
                    status: new.status,
                    created_at: Utc::now(),
                })
            });

        let uow = TestUnitOfWork::default()
            .with_users(users_with(2))
            .with_cars(cars_with(7))
            .with_reservations(reservations);
        let created = ReservationManager::new(Arc::new(uow))
            .add_reservation(CreateReservation {
                user_id: 2,
                car_id: 7,
                pickup_date: date(1),
                dropoff_date: date(4),
            })
            .await
            .unwrap();

        assert_eq!(created.id, 11);
        assert_eq!(created.total_price, 90.0);
    }

    #[tokio::test]
    async fn test_add_reservation_unknown_car() {
        let mut cars = MockCarRepository::new();
        cars.expect_find_by_id().returning(|_| Ok(None));
        let mut reservations = MockReservationRepository::new();
        reservations.expect_create().never();

        let uow = TestUnitOfWork::default()
            .with_users(users_with(2))
            .with_cars(cars)
            .with_reservations(reservations);
        let err = ReservationManager::new(Arc::new(uow))
            .add_reservation(CreateReservation {
                user_id: 2,
                car_id: 99,
                pickup_date: date(1),
                dropoff_date: date(2),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_update_missing_reservation() {
        let mut reservations = MockReservationRepository::new();
        reservations.expect_find_by_id().returning(|_| Ok(None));
        reservations.expect_update().never();

        let uow = TestUnitOfWork::default().with_reservations(reservations);
        let err = ReservationManager::new(Arc::new(uow))
            .update_reservation(UpdateReservation {
                id: 404,
                user_id: 2,
                car_id: 7,
                pickup_date: date(1),
                dropoff_date: date(2),
                status: ReservationStatus::Confirmed,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_creation_time_and_reprices() {
        let original = reservation(8, 7, 2);
        let created_at = original.created_at;
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_by_id()
            .returning(move |_| Ok(Some(original.clone())));
        reservations
            .expect_update()
            .withf(move |r| r.created_at == created_at && r.total_price == 30.0)
            .returning(|r| Ok(r));

        let uow = TestUnitOfWork::default()
            .with_users(users_with(2))
            .with_cars(cars_with(7))
            .with_reservations(reservations);
        let updated = ReservationManager::new(Arc::new(uow))
            .update_reservation(UpdateReservation {
                id: 8,
                user_id: 2,
                car_id: 7,
                pickup_date: date(10),
                dropoff_date: date(10),
                status: ReservationStatus::Confirmed,
            })
            .await
            .unwrap();

        assert_eq!(updated.status, ReservationStatus::Confirmed);
    }
}
