// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

/// A QR code used to pair the company's WhatsApp account with the backend.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    qr_code_image: String,
}

impl QrCode {
    /// The QR code image, base64 encoded.
    pub fn image(&self) -> &String {
        &self.qr_code_image
    }
}

/// The state of the WhatsApp connection, as reported by the backend.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    connection_status: String,
}

impl ConnectionStatus {
    pub fn status(&self) -> &String {
        &self.connection_status
    }
}
