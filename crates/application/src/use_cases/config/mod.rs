mod reload;

pub use reload::ReloadRecordsUseCase;
