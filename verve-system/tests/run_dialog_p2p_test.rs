// verve-system/tests/run_dialog_p2p_test.rs
//
// Talks to in-process providers over peer-to-peer D-Bus connections, so no bus
// daemon is needed. The provider only answers when method, interface and path on
// the wire match what it serves, and records the destination each call was sent to.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::net::UnixStream;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing_subscriber::{fmt, EnvFilter};
use verve_core::config::LauncherEnvironment;
use verve_system::display_management::{DisplayError, DisplayQuery};
use verve_system::{
    LaunchRequest, LauncherError, LauncherInvoker, RunDialogClient, SessionBus, VerveFocusClient,
    ZbusRunDialogClient, ZbusVerveFocusClient,
};
use zbus::{dbus_interface, ConnectionBuilder, Guid, Interface, MessageHeader};

// ANCHOR: TestProviders
const RUN_DIALOG_PATH: &str = "/org/xfce/RunDialog";
const TEST_DEADLINE: Duration = Duration::from_secs(5);

#[derive(Clone, Default)]
struct RunDialogProvider {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    destinations: Arc<Mutex<Vec<Option<String>>>>,
}

fn destination_of(hdr: &MessageHeader<'_>) -> Option<String> {
    hdr.destination().ok().flatten().map(|name| name.to_string())
}

#[dbus_interface(name = "org.xfce.RunDialog")]
impl RunDialogProvider {
    #[dbus_interface(name = "OpenDialog")]
    async fn open_dialog(&self, #[zbus(header)] hdr: MessageHeader<'_>, dir: String, display: String) -> bool {
        self.destinations.lock().await.push(destination_of(&hdr));
        self.calls.lock().await.push((dir, display));
        true
    }
}

#[derive(Clone, Default)]
struct VerveProvider {
    delay: Duration,
    calls: Arc<AtomicUsize>,
    destinations: Arc<Mutex<Vec<Option<String>>>>,
}

#[dbus_interface(name = "org.xfce.Verve")]
impl VerveProvider {
    #[dbus_interface(name = "GrabFocus")]
    async fn grab_focus(&self, #[zbus(header)] hdr: MessageHeader<'_>) -> bool {
        self.destinations.lock().await.push(destination_of(&hdr));
        tokio::time::sleep(self.delay).await;
        self.calls.fetch_add(1, Ordering::SeqCst);
        true
    }
}

struct FixedDisplay(&'static str);

impl DisplayQuery for FixedDisplay {
    fn default_display_name(&self, _env: &LauncherEnvironment) -> Result<String, DisplayError> {
        Ok(self.0.to_owned())
    }
}

fn init_tracing() {
    let _ = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Connects a client to a peer serving `iface` at `path`.
/// The server connection is returned so it stays alive for the test.
async fn connect_to_provider<I: Interface>(path: &str, iface: I) -> Result<(SessionBus, zbus::Connection)> {
    let guid = Guid::generate();
    let (client_stream, server_stream) = UnixStream::pair()?;

    let server = ConnectionBuilder::unix_stream(server_stream)
        .server(&guid)
        .p2p()
        .serve_at(path, iface)?
        .build();
    let client = ConnectionBuilder::unix_stream(client_stream).p2p().build();

    let (server, client) = tokio::try_join!(server, client)?;
    Ok((SessionBus::from_connection(client), server))
}

// ANCHOR: OpenDialogTests
#[tokio::test]
async fn test_open_dialog_reaches_provider_with_ordered_args() -> Result<()> {
    init_tracing();
    let provider = RunDialogProvider::default();
    let (bus, _server) = connect_to_provider(RUN_DIALOG_PATH, provider.clone()).await?;

    let client = ZbusRunDialogClient::connect(&bus).await?;
    let invoker = LauncherInvoker::new(client, FixedDisplay(":0.0"));
    let env = LauncherEnvironment::from_vars([("HOME", "/home/alice")]);

    let sent = timeout(TEST_DEADLINE, invoker.invoke(&env)).await??;

    assert_eq!(
        sent,
        LaunchRequest {
            home_dir: "/home/alice".to_owned(),
            display_name: ":0.0".to_owned(),
        }
    );
    assert_eq!(
        *provider.calls.lock().await,
        vec![("/home/alice".to_owned(), ":0.0".to_owned())]
    );
    assert_eq!(
        *provider.destinations.lock().await,
        vec![Some("org.xfce.RunDialog".to_owned())]
    );
    Ok(())
}

#[tokio::test]
async fn test_open_dialog_sends_literal_fallback_when_home_unset() -> Result<()> {
    init_tracing();
    let provider = RunDialogProvider::default();
    let (bus, _server) = connect_to_provider(RUN_DIALOG_PATH, provider.clone()).await?;

    let client = ZbusRunDialogClient::connect(&bus).await?;
    let invoker = LauncherInvoker::new(client, FixedDisplay("wayland-0"));
    let env = LauncherEnvironment::from_vars([("DISPLAY", ":0")]);

    timeout(TEST_DEADLINE, invoker.invoke(&env)).await??;

    assert_eq!(
        *provider.calls.lock().await,
        vec![("~/".to_owned(), "wayland-0".to_owned())]
    );
    Ok(())
}

#[tokio::test]
async fn test_open_dialog_without_provider_object_is_service_unavailable() -> Result<()> {
    init_tracing();
    let (bus, _server) = connect_to_provider("/org/xfce/Elsewhere", RunDialogProvider::default()).await?;

    let client = ZbusRunDialogClient::connect(&bus).await?;
    let err = timeout(TEST_DEADLINE, client.open_dialog("/home/alice", ":0.0"))
        .await?
        .unwrap_err();

    assert!(
        matches!(err, LauncherError::ServiceUnavailable { service: "org.xfce.RunDialog", .. }),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[tokio::test]
async fn test_open_dialog_on_wrong_interface_is_remote_call_error() -> Result<()> {
    init_tracing();
    let (bus, _server) = connect_to_provider(RUN_DIALOG_PATH, VerveProvider::default()).await?;

    let client = ZbusRunDialogClient::connect(&bus).await?;
    let err = timeout(TEST_DEADLINE, client.open_dialog("/home/alice", ":0.0"))
        .await?
        .unwrap_err();

    assert!(
        matches!(
            err,
            LauncherError::RemoteCall {
                interface: "org.xfce.RunDialog",
                method: "OpenDialog",
                ..
            }
        ),
        "unexpected error: {err:?}"
    );
    Ok(())
}

// ANCHOR: GrabFocusTests
#[tokio::test]
async fn test_grab_focus_is_acknowledged() -> Result<()> {
    init_tracing();
    let provider = VerveProvider::default();
    let (bus, _server) = connect_to_provider(RUN_DIALOG_PATH, provider.clone()).await?;

    let client = ZbusVerveFocusClient::connect(&bus).await?;
    timeout(TEST_DEADLINE, client.grab_focus()).await??;

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        *provider.destinations.lock().await,
        vec![Some("org.xfce.Verve".to_owned())]
    );
    Ok(())
}

#[tokio::test]
async fn test_grab_focus_times_out_on_slow_provider() -> Result<()> {
    init_tracing();
    let provider = VerveProvider {
        delay: Duration::from_secs(3),
        ..Default::default()
    };
    let (bus, _server) = connect_to_provider(RUN_DIALOG_PATH, provider).await?;

    let client = ZbusVerveFocusClient::with_timeout(&bus, Duration::from_millis(100)).await?;
    let err = timeout(TEST_DEADLINE, client.grab_focus()).await?.unwrap_err();

    assert!(
        matches!(
            err,
            LauncherError::Timeout {
                interface: "org.xfce.Verve",
                method: "GrabFocus",
                ..
            }
        ),
        "unexpected error: {err:?}"
    );
    Ok(())
}
