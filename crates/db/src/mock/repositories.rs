use chrono::NaiveDate;
use mockall::mock;
use uuid::Uuid;

use crate::models::{
    DbAppointment, DbBusySlot, DbEmployee, DbReview, DbReviewAggregate, DbSalon,
    DbScheduleOverride, DbService,
};
use crate::repositories::appointment::BookingOutcome;

// Mock repositories for testing
mock! {
    pub SalonRepo {
        pub async fn create_salon(
            &self,
            name: &'static str,
            address: &'static str,
            open_from: &'static str,
            open_to: &'static str,
        ) -> eyre::Result<DbSalon>;

        pub async fn get_salon_by_id(&self, id: Uuid) -> eyre::Result<Option<DbSalon>>;

        pub async fn list_salons(&self) -> eyre::Result<Vec<DbSalon>>;

        pub async fn update_salon_hours(
            &self,
            id: Uuid,
            open_from: &'static str,
            open_to: &'static str,
        ) -> eyre::Result<Option<DbSalon>>;
    }
}

mock! {
    pub ServiceRepo {
        pub async fn create_service(
            &self,
            salon_id: Uuid,
            name: &'static str,
            duration_minutes: i32,
            price: f64,
        ) -> eyre::Result<DbService>;

        pub async fn get_service_by_id(&self, id: Uuid) -> eyre::Result<Option<DbService>>;

        pub async fn list_services_by_salon(&self, salon_id: Uuid) -> eyre::Result<Vec<DbService>>;
    }
}

mock! {
    pub EmployeeRepo {
        pub async fn get_employee_by_id(&self, id: Uuid) -> eyre::Result<Option<DbEmployee>>;

        pub async fn list_employees_by_salon(
            &self,
            salon_id: Uuid,
        ) -> eyre::Result<Vec<DbEmployee>>;

        pub async fn update_weekly_pattern(
            &self,
            id: Uuid,
            work_days: &'static str,
            breaks: serde_json::Value,
        ) -> eyre::Result<Option<DbEmployee>>;
    }
}

mock! {
    pub ScheduleOverrideRepo {
        pub async fn get_override(
            &self,
            employee_id: Uuid,
            date: NaiveDate,
        ) -> eyre::Result<Option<DbScheduleOverride>>;

        pub async fn list_overrides_in_range(
            &self,
            employee_id: Uuid,
            from: NaiveDate,
            to: NaiveDate,
        ) -> eyre::Result<Vec<DbScheduleOverride>>;
    }
}

mock! {
    pub AppointmentRepo {
        pub async fn book_appointment(
            &self,
            salon_id: Uuid,
            employee_id: Uuid,
            service_id: Uuid,
            client_name: &'static str,
            date: NaiveDate,
            time: &'static str,
            duration_minutes: u16,
        ) -> eyre::Result<BookingOutcome>;

        pub async fn get_appointment_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbAppointment>>;

        pub async fn busy_slots_for_day(
            &self,
            employee_id: Uuid,
            date: NaiveDate,
        ) -> eyre::Result<Vec<DbBusySlot>>;

        pub async fn update_status(
            &self,
            id: Uuid,
            status: &'static str,
        ) -> eyre::Result<Option<DbAppointment>>;
    }
}

mock! {
    pub ReviewRepo {
        pub async fn create_review(
            &self,
            appointment_id: Uuid,
            rating: i16,
            comment: Option<&'static str>,
        ) -> eyre::Result<DbReview>;

        pub async fn list_by_employee(&self, employee_id: Uuid) -> eyre::Result<Vec<DbReview>>;

        pub async fn aggregate_for_employee(
            &self,
            employee_id: Uuid,
        ) -> eyre::Result<DbReviewAggregate>;
    }
}
