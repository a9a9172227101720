mod shooting_result;

pub use shooting_result::ShootingResult;
