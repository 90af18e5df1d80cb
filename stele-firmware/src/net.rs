//! WiFi association and the bounded TCP fetch.

use defmt::{info, warn};
use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::TcpSocket;
use embassy_net::{IpAddress, Ipv4Address, Stack};
use embassy_time::{with_timeout, Duration, Timer};
use embedded_io_async::Read;
use esp_wifi::wifi::{
    ClientConfiguration, Configuration, WifiController, WifiDevice, WifiEvent, WifiStaDevice,
    WifiState,
};
use heapless::Vec;
use stele_core::{NetworkConfig, ServerConfig};
use stele_protocol::{drain_records, FactTable, FetchError, PollBudget, Record, RecordParser};

const RX_BUFFER: usize = 4096;
const TX_BUFFER: usize = 512;

/// Records merged per fetch cycle. The server pushes one short burst
/// per connection, so this only has to cover a single burst.
const MAX_RECORDS_PER_FETCH: usize = 16;

#[embassy_executor::task]
pub async fn net_task(stack: &'static Stack<WifiDevice<'static, WifiStaDevice>>) {
    stack.run().await
}

/// Keep the station associated, reconnecting with a short backoff
/// after drops.
#[embassy_executor::task]
pub async fn connection(mut controller: WifiController<'static>, net: &'static NetworkConfig) {
    loop {
        if esp_wifi::wifi::get_wifi_state() == WifiState::StaConnected {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            warn!("wifi disconnected");
            Timer::after_secs(5).await;
        }
        if !matches!(controller.is_started(), Ok(true)) {
            let client = Configuration::Client(ClientConfiguration {
                ssid: net.ssid.clone(),
                password: net.password.clone(),
                ..Default::default()
            });
            if controller.set_configuration(&client).is_err() {
                warn!("wifi configuration rejected");
                Timer::after_secs(5).await;
                continue;
            }
            if controller.start().await.is_err() {
                warn!("wifi start failed");
                Timer::after_secs(5).await;
                continue;
            }
        }
        match controller.connect().await {
            Ok(()) => info!("wifi associated"),
            Err(_) => {
                warn!("wifi connect failed, retrying");
                Timer::after_secs(5).await;
            }
        }
    }
}

/// Connect to the dashboard server, wait out the poll budget for it to
/// push data, then drain the stream and merge the records into `facts`.
///
/// Returns the number of records merged. A server that accepts the
/// connection but stays silent for the whole budget yields `Ok(0)`.
pub async fn fetch(
    stack: &'static Stack<WifiDevice<'static, WifiStaDevice>>,
    server: &ServerConfig,
    parser: &mut RecordParser,
    facts: &mut FactTable,
) -> Result<usize, FetchError> {
    let mut rx = [0u8; RX_BUFFER];
    let mut tx = [0u8; TX_BUFFER];
    let mut socket = TcpSocket::new(stack, &mut rx, &mut tx);

    let address = resolve(stack, server).await?;
    socket
        .connect((address, server.port))
        .await
        .map_err(|_| FetchError::Connect)?;

    let budget = PollBudget::default();
    let mut records = Vec::<Record, MAX_RECORDS_PER_FETCH>::new();
    let mut chunk = [0u8; 256];

    // The server pushes immediately on accept; the budget only covers
    // the window until the first bytes show up.
    match with_timeout(
        Duration::from_millis(budget.total_ms() as u64),
        socket.read(&mut chunk),
    )
    .await
    {
        Err(_) => {
            parser.reset();
            socket.close();
            return Ok(0);
        }
        Ok(Ok(0)) => {
            parser.reset();
            return Ok(0);
        }
        Ok(Ok(n)) => parser.feed_bytes(&chunk[..n], &mut records),
        Ok(Err(_)) => {
            parser.reset();
            return Err(FetchError::Io);
        }
    }

    // Data started flowing; drain until the server closes. The idle
    // timeout guards against a server that keeps the socket open
    // without ever finishing.
    socket.set_timeout(Some(Duration::from_secs(5)));
    if drain_records(&mut socket, parser, &mut records)
        .await
        .is_err()
    {
        warn!("stream ended abnormally, keeping parsed records");
    }

    for record in &records {
        facts.apply(record);
    }
    Ok(records.len())
}

/// Resolve the configured host, accepting both dotted-quad literals
/// and DNS names.
async fn resolve(
    stack: &'static Stack<WifiDevice<'static, WifiStaDevice>>,
    server: &ServerConfig,
) -> Result<IpAddress, FetchError> {
    if let Ok(literal) = server.host.parse::<core::net::Ipv4Addr>() {
        let o = literal.octets();
        return Ok(IpAddress::Ipv4(Ipv4Address::new(o[0], o[1], o[2], o[3])));
    }
    let answers = stack
        .dns_query(&server.host, DnsQueryType::A)
        .await
        .map_err(|_| FetchError::Connect)?;
    answers.first().copied().ok_or(FetchError::Connect)
}
