pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod device_repo;
pub use device_repo::DeviceRepository;
pub mod service_repo;
pub use service_repo::ServiceRepository;
pub mod task_repo;
pub use task_repo::TaskRepository;
pub mod work_order_repo;
pub use work_order_repo::WorkOrderRepository;
pub mod report_repo;
pub use report_repo::ReportRepository;
