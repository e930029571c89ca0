// 8.0 engine/core.rs: the engine holds configuration and the dead-money policy. nothing else.

use super::config::EngineConfig;
use super::results::EngineError;
use crate::cap::CapParams;
use crate::dead_money::{AggregateOnly, DeadMoneyPolicy};

/** 8.1: main engine struct. immutable once built, safe to share across threads */
#[derive(Debug)]
pub struct TradeEngine {
    pub(super) config: EngineConfig,
    pub(super) dead_money: Box<dyn DeadMoneyPolicy>,
}

impl TradeEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.league.validate()?;
        Ok(Self {
            config,
            dead_money: Box::new(AggregateOnly),
        })
    }

    pub fn with_dead_money_policy(mut self, policy: impl DeadMoneyPolicy + 'static) -> Self {
        self.dead_money = Box::new(policy);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cap_params(&self) -> &CapParams {
        &self.config.league.cap
    }
}
