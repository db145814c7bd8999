use crate::config::LiveLinkConfig;
use crate::error::{Error, Result};
use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Sends the generated Python script to the Blender Live-Link server.
///
/// The listener inside Blender executes whatever it receives, so the stream is
/// closed right after the write to mark the end of the script.
pub fn send_to_blender(script: &str, link: &LiveLinkConfig) -> Result<()> {
    let target = resolve(&link.address)?;
    log::info!("Sending script ({} bytes) to Blender at {}", script.len(), target);

    let mut stream = TcpStream::connect_timeout(&target, Duration::from_secs(link.timeout_secs))
        .map_err(|source| Error::Connect {
            addr: link.address.clone(),
            source,
        })?;
    stream.write_all(script.as_bytes()).map_err(Error::Transfer)?;
    stream.flush().map_err(Error::Transfer)?;

    log::info!("Live-Link successful, script transferred to Blender");
    Ok(())
}

fn resolve(address: &str) -> Result<SocketAddr> {
    let invalid = |source| Error::Connect {
        addr: address.to_string(),
        source,
    };
    address
        .to_socket_addrs()
        .map_err(invalid)?
        .next()
        .ok_or_else(|| {
            invalid(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "address resolved to nothing",
            ))
        })
}

// ----------------------------------------------------------------------------
// unittest
// ----------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_script_arrives_intact() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut received = String::new();
            conn.read_to_string(&mut received).unwrap();
            received
        });

        let link = LiveLinkConfig {
            address: addr.to_string(),
            timeout_secs: 2,
        };
        send_to_blender("import bpy\nprint('ok')\n", &link).unwrap();

        assert_eq!(server.join().unwrap(), "import bpy\nprint('ok')\n");
    }

    #[test]
    fn test_unreachable_listener_is_an_error() {
        // bind then drop to get a port that is very likely closed
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();

        let link = LiveLinkConfig {
            address: addr.to_string(),
            timeout_secs: 1,
        };
        let err = send_to_blender("import bpy\n", &link).unwrap_err();
        assert!(matches!(err, Error::Connect { .. }));
    }

    #[test]
    fn test_garbage_address_is_an_error() {
        let link = LiveLinkConfig {
            address: "not an address".into(),
            timeout_secs: 1,
        };
        assert!(matches!(
            send_to_blender("", &link),
            Err(Error::Connect { .. })
        ));
    }
}
