// Gateway request body encoding.
//
// The gateway speaks a line-oriented `key=value` format terminated by CRLF.
// Field order follows the vendor app; most gateways ignore order but some
// firmware revisions do not.

use secrecy::{ExposeSecret, SecretString};

/// Protocol version sent with every command.
pub const PROTOCOL_VERSION: &str = "2";

/// Device-type marker the gateways expect from phone clients.
pub const DEVICE_MARKER: &str = "1.001";

const REDACTED: &str = "***";

/// One command addressed to a gateway.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub username: String,
    pub password: SecretString,
    /// Static credential-like value from configuration (not a payload hash).
    pub md5: SecretString,
    /// Protocol group code: a descriptor's `start` or `stop` code.
    pub group: String,
    /// Motion code: `0` up, `1` down, `None` for stop.
    pub value: Option<u8>,
}

impl GatewayRequest {
    /// Encode the wire body.
    pub fn encode(&self) -> String {
        self.render(self.password.expose_secret(), self.md5.expose_secret())
    }

    /// Encode the body with secrets masked, for logging.
    pub fn redacted(&self) -> String {
        self.render(REDACTED, REDACTED)
    }

    fn render(&self, password: &str, md5: &str) -> String {
        let value = self.value.map(|v| v.to_string()).unwrap_or_default();
        let fields = [
            ("username", self.username.as_str()),
            ("password", password),
            ("sk", ""),
            ("version", PROTOCOL_VERSION),
            ("md5", md5),
            ("group", self.group.as_str()),
            ("eis", DEVICE_MARKER),
            ("value", value.as_str()),
        ];

        let mut body = String::with_capacity(128);
        for (key, val) in fields {
            body.push_str(key);
            body.push('=');
            body.push_str(val);
            body.push_str("\r\n");
        }
        body
    }
}
