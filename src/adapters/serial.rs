use crate::domain::ports::ByteSource;
use crate::utils::error::Result;
use std::io::Read;
use std::time::Duration;

/// GPS receiver on a serial device. The port is polled, never waited on:
/// `bytes_available` asks the driver what is already buffered and the read
/// timeout only bounds the copy of bytes we know exist.
pub struct SerialByteSource {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialByteSource {
    /// Opening the device is the one fatal resource acquisition in the
    /// program; everything downstream of it recovers.
    pub fn open(path: &str, baud: u32) -> Result<Self> {
        let port = serialport::new(path, baud)
            .timeout(Duration::from_millis(10))
            .open()?;
        tracing::info!("Opened serial port {} at {} baud", path, baud);
        Ok(Self { port })
    }

    /// Names of the serial devices currently present, for `--list-ports`.
    pub fn list_ports() -> Result<Vec<String>> {
        let ports = serialport::available_ports()?;
        Ok(ports.into_iter().map(|info| info.port_name).collect())
    }
}

impl ByteSource for SerialByteSource {
    fn bytes_available(&self) -> Result<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.port.read(buf) {
            Ok(read) => Ok(read),
            // 超時/暫無資料視同 0 byte,交給下一tick
            Err(e)
                if e.kind() == std::io::ErrorKind::TimedOut
                    || e.kind() == std::io::ErrorKind::WouldBlock =>
            {
                Ok(0)
            }
            Err(e) => Err(e.into()),
        }
    }
}
