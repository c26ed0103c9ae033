use std::time::Duration;

use modscan_common::modbus::UnitId;
use tokio::time;
use tokio_modbus::client::Context;
use tokio_modbus::prelude::*;

use crate::error::ProbeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    Holding,
    Input,
}

/// A contiguous block of registers read to identify a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterBlock {
    pub base: u16,
    pub count: u16,
    pub access: RegisterAccess,
}

impl RegisterBlock {
    pub const fn holding(base: u16, count: u16) -> Self {
        Self {
            base,
            count,
            access: RegisterAccess::Holding,
        }
    }

    pub const fn input(base: u16, count: u16) -> Self {
        Self {
            base,
            count,
            access: RegisterAccess::Input,
        }
    }
}

/// What a unit answered. An exception still proves that a device is there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Registers(Vec<u16>),
    Exception(ExceptionCode),
}

pub async fn read_block(
    ctx: &mut Context,
    unit: UnitId,
    block: RegisterBlock,
    timeout: Duration,
) -> Result<Reply, ProbeError> {
    ctx.set_slave(Slave(unit.get()));

    let request = async {
        match block.access {
            RegisterAccess::Holding => ctx.read_holding_registers(block.base, block.count).await,
            RegisterAccess::Input => ctx.read_input_registers(block.base, block.count).await,
        }
    };

    let response = time::timeout(timeout, request)
        .await
        .map_err(|_| ProbeError::Timeout(timeout))??;

    Ok(match response {
        Ok(words) => Reply::Registers(words),
        Err(code) => Reply::Exception(code),
    })
}
