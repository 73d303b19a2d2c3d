mod admin_dtos;

pub use admin_dtos::ResetSummaryDto;
