//! Subscriptions: placeholder screen with a back arrow.

use super::PageBase;
use crate::backend::Backend;
use crate::navigation::ScreenProps;

#[derive(Debug)]
pub struct SubscriptionsPage {
    base: PageBase,
}

impl SubscriptionsPage {
    pub fn new(props: ScreenProps, backend: Backend) -> Self {
        Self {
            base: PageBase::new(props, backend),
        }
    }

    pub fn title(&self) -> &'static str {
        "Subscriptions"
    }

    pub fn back(&self) {
        self.base.back();
    }
}
