pub mod archivo;
pub mod semana;
pub mod staff_user;

pub use archivo::Entity as ArchivoEntity;
pub use semana::Entity as SemanaEntity;
pub use staff_user::Entity as StaffUserEntity;
