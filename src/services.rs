pub mod costing;
pub mod mutation_plan;

pub mod client_service;
pub use client_service::ClientService;
pub mod device_service;
pub use device_service::DeviceService;
pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod task_service;
pub use task_service::TaskService;
pub mod work_order_service;
pub use work_order_service::WorkOrderService;
pub mod report_service;
pub use report_service::ReportService;
