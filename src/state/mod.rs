use crate::order_service::OrderService;
use actix_web::web::Data;

#[derive(Clone)]
pub struct AppState {
    pub orders: OrderService,
}

impl AppState {
    pub fn new(orders: OrderService) -> Data<Self> {
        Data::new(Self { orders })
    }
}
