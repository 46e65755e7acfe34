use embassy_executor::Spawner;
use embassy_net::{Config, Ipv4Address, Ipv4Cidr, Stack, StackResources, StaticConfigV4};
use embassy_net_tuntap::TunTapDevice;
use static_cell::StaticCell;
use ww_common::*;
use ww_core::services::Lcg;

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, TunTapDevice>) -> ! {
    runner.run().await
}

/// embassy-net stack on a TAP interface.
pub struct TunTapNetwork {
    stack: Stack<'static>,
}

impl TunTapNetwork {
    pub fn new(spawner: Spawner, interface: &str) -> SystemResult<Self> {
        let device = TunTapDevice::new(interface).map_err(|e| {
            error!("TAP device {} failed: {:?}", interface, e);
            SystemError::HardwareError(HardwareError::CommunicationError)
        })?;

        let mut static_config = StaticConfigV4 {
            address: Ipv4Cidr::new(Ipv4Address::new(192, 168, 69, 2), 24),
            dns_servers: Default::default(),
            gateway: Some(Ipv4Address::new(192, 168, 69, 100)),
        };
        let _ = static_config.dns_servers.push(Ipv4Address::new(1, 1, 1, 1));
        let config = Config::ipv4_static(static_config);

        let seed = Lcg::new().next();

        static RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();
        let (stack, runner) = embassy_net::new(
            device,
            config,
            RESOURCES.init(StackResources::new()),
            u64::from(seed),
        );

        spawner.spawn(net_task(runner)).map_err(|e| {
            error!("Failed to spawn net task: {:?}", e);
            SystemError::ServiceError(ServiceError::OperationFailed)
        })?;

        info!("Network stack up on {}", interface);
        Ok(Self { stack })
    }

    pub fn stack(&self) -> Stack<'static> {
        self.stack
    }
}
