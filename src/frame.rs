//! Length-prefixed frame codec
//!
//! Request: `[length, command, payload...]` where `length = 1 + payload.len()`.
//! Response: `[length, command, status, payload...]` where `length = 2 + payload.len()`,
//! padded out to the full read buffer.

use crate::types::{Command, MAX_PAYLOAD_LEN, Response, Sl030Error, Status};

/// Bit 7 arrives set on every byte read back over the Pi's I2C master.
const HIGH_BIT_MASK: u8 = 0x7F;

/// Encode a command and its payload into a request frame
pub fn encode(command: Command, payload: &[u8]) -> Result<Vec<u8>, Sl030Error> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(Sl030Error::InvalidArgument(format!(
            "Payload too large: {} bytes (maximum: {} bytes)",
            payload.len(),
            MAX_PAYLOAD_LEN
        )));
    }

    let mut frame = Vec::with_capacity(payload.len() + 2);
    frame.push(1 + payload.len() as u8);
    frame.push(command.0);
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Decode a raw response buffer
pub fn decode(raw: &[u8]) -> Result<Response, Sl030Error> {
    let corrected: Vec<u8> = raw.iter().map(|&b| b & HIGH_BIT_MASK).collect();

    if corrected.len() < 3 {
        return Err(Sl030Error::Protocol(format!(
            "Response too short: {:02X?}",
            corrected
        )));
    }

    let length = corrected[0] as usize;
    if length < 2 {
        return Err(Sl030Error::Protocol(format!(
            "Response length {} cannot hold command and status",
            length
        )));
    }
    if length + 1 > corrected.len() {
        return Err(Sl030Error::Protocol(format!(
            "Response claims {} bytes but only {} were read",
            length + 1,
            corrected.len()
        )));
    }

    Ok(Response {
        command: Command(corrected[1]),
        status: Status(corrected[2]),
        payload: corrected[3..=length].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_select() {
        assert_eq!(encode(Command::SELECT, &[]).unwrap(), [0x01, 0x01]);
    }

    #[test]
    fn test_encode_with_payload() {
        let frame = encode(Command(0x03), &[0x04, 0xAA]).unwrap();
        assert_eq!(frame, [0x03, 0x03, 0x04, 0xAA]);
    }

    #[test]
    fn test_encode_max_payload() {
        let frame = encode(Command(0x04), &[0u8; MAX_PAYLOAD_LEN]).unwrap();
        assert_eq!(frame.len(), 256);
        assert_eq!(frame[0], 0xFF);
    }

    #[test]
    fn test_encode_payload_too_large() {
        let result = encode(Command(0x04), &[0u8; MAX_PAYLOAD_LEN + 1]);
        assert!(matches!(result, Err(Sl030Error::InvalidArgument(_))));
    }

    #[test]
    fn test_decode_ignores_padding() {
        let mut raw = vec![0x03, 0x01, 0x00, 0x07];
        raw.resize(256, 0x00);

        let response = decode(&raw).unwrap();
        assert_eq!(response.command, Command::SELECT);
        assert_eq!(response.status, Status::SUCCESS);
        assert_eq!(response.payload, [0x07]);
    }

    #[test]
    fn test_decode_masks_high_bit() {
        let clean = [0x06, 0x01, 0x00, 0x2A, 0x3B, 0x4C, 0x01, 0x00];
        let dirty: Vec<u8> = clean.iter().map(|b| b | 0x80).collect();

        assert_eq!(decode(&dirty).unwrap(), decode(&clean).unwrap());
        assert_eq!(decode(&dirty).unwrap().payload, [0x2A, 0x3B, 0x4C, 0x01]);
    }

    #[test]
    fn test_decode_masks_length_byte() {
        // 0x82 would overrun the buffer if the length were read unmasked
        let raw = [0x82, 0x81, 0x80];
        let response = decode(&raw).unwrap();
        assert_eq!(response.command, Command::SELECT);
        assert!(response.payload.is_empty());
    }

    #[test]
    fn test_decode_recovers_encoded_response() {
        // A response is a request frame whose first payload byte is the status
        let frame = encode(Command(0x10), &[0x01, 0x11, 0x22, 0x33]).unwrap();
        let response = decode(&frame).unwrap();

        assert_eq!(frame[0] as usize, 1 + 4);
        assert_eq!(response.command, Command(0x10));
        assert_eq!(response.status, Status(0x01));
        assert_eq!(response.payload, [0x11, 0x22, 0x33]);
    }

    #[test]
    fn test_decode_too_short() {
        assert!(matches!(decode(&[0x02, 0x01]), Err(Sl030Error::Protocol(_))));
        assert!(matches!(decode(&[]), Err(Sl030Error::Protocol(_))));
    }

    #[test]
    fn test_decode_zero_length() {
        let raw = [0x00, 0x01, 0x00, 0x00];
        assert!(matches!(decode(&raw), Err(Sl030Error::Protocol(_))));
    }

    #[test]
    fn test_decode_length_exceeds_buffer() {
        let raw = [0x10, 0x01, 0x00, 0x07];
        assert!(matches!(decode(&raw), Err(Sl030Error::Protocol(_))));
    }
}
