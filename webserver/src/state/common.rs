use crate::appstate::AppState;
use crate::service::balance::BalanceService;

#[derive(Clone)]
pub struct CommonState {
    pub balance_service: BalanceService,
}

impl CommonState {
    pub fn new(data: AppState) -> Self {
        Self {
            balance_service: BalanceService::new(data),
        }
    }
}
