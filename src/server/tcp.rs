//! # Servidor TCP Secuencial
//! src/server/tcp.rs
//!
//! Acepta conexiones de a una: cada conexión se lee, se registra y se
//! responde completa antes del siguiente `accept()`. No hay threads de
//! trabajo ni estado compartido entre requests.
//!
//! El listener pertenece al `Server` y se cierra cuando el servidor se
//! destruye, tanto al pedir shutdown como al salir por error. Un shutdown
//! también corta la conexión en curso, así un cliente inactivo no deja al
//! servidor bloqueado en la lectura.

use crate::config::Config;
use crate::error::{ServerError, ServerResult};
use crate::files::StaticFiles;
use crate::handler::LoggingHandler;
use crate::http::{Method, ParseError, Request, Response};
use log::{debug, error, info, warn};
use std::io::{BufReader, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Valor del header `Server`
pub const SERVER_NAME: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Tiempo máximo para la conexión que despierta al `accept()`
const WAKE_TIMEOUT: Duration = Duration::from_millis(500);

/// Conexión que se está atendiendo, compartida con los `ShutdownHandle`
type ActiveConnection = Arc<Mutex<Option<TcpStream>>>;

/// Servidor HTTP que atiende una conexión a la vez
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    handler: LoggingHandler,
    shutdown: Arc<AtomicBool>,
    active: ActiveConnection,
}

/// Permite detener un `Server` desde otro thread (ej: el handler de ^C)
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    active: ActiveConnection,
    wake_addr: SocketAddr,
}

impl ShutdownHandle {
    /// Pide al servidor que termine
    ///
    /// La conexión en curso se corta (lecturas y escrituras fallan o ven
    /// EOF) y `run` retorna sin aceptar otra. Llamarlo más de una vez no
    /// tiene efecto.
    pub fn shutdown(&self) {
        if self.flag.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Ok(active) = self.active.lock() {
            if let Some(stream) = active.as_ref() {
                if let Err(e) = stream.shutdown(Shutdown::Both) {
                    debug!("no se pudo cortar la conexión en curso: {}", e);
                }
            }
        }

        // accept() sigue bloqueado hasta que llegue una conexión
        if let Err(e) = TcpStream::connect_timeout(&self.wake_addr, WAKE_TIMEOUT) {
            debug!("no se pudo despertar al listener en {}: {}", self.wake_addr, e);
        }
    }

    /// Indica si ya se pidió el shutdown
    pub fn is_shutdown(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl Server {
    /// Abre el listener y prepara el handler que escribe los bodies en stdout
    ///
    /// # Errores
    ///
    /// `ServerError::Bind` si no se puede escuchar en `config.address()`.
    pub fn new(config: &Config) -> ServerResult<Self> {
        let handler = LoggingHandler::new(StaticFiles::new(&config.root));
        Self::with_handler(config, handler)
    }

    /// Igual que `new` pero con un handler ya construido
    pub fn with_handler(config: &Config, handler: LoggingHandler) -> ServerResult<Self> {
        let address = config.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            addr: address.clone(),
            source,
        })?;
        let local_addr = listener.local_addr()?;

        info!(
            "servidor escuchando en {} (raíz: {})",
            local_addr,
            handler.files().root().display()
        );

        Ok(Self {
            listener,
            local_addr,
            handler,
            shutdown: Arc::new(AtomicBool::new(false)),
            active: Arc::new(Mutex::new(None)),
        })
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handle para detener el servidor desde otro thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            active: Arc::clone(&self.active),
            wake_addr: wake_address(self.local_addr),
        }
    }

    /// Corre el accept-loop hasta que se pida shutdown
    ///
    /// Los errores de una conexión se registran y el loop sigue. Al
    /// retornar el servidor se destruye y el listener queda cerrado.
    pub fn run(mut self) -> ServerResult<()> {
        info!("modo secuencial: una conexión a la vez");

        while !self.shutdown.load(Ordering::SeqCst) {
            let (stream, peer) = match self.listener.accept() {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("error al aceptar conexión: {}", e);
                    continue;
                }
            };

            // Registrar antes de mirar el flag: un shutdown que llega
            // después de este punto corta el stream
            self.set_active(stream.try_clone().ok());
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }

            debug!("nueva conexión desde {}", peer);
            if let Err(e) = self.handle_connection(stream, peer) {
                error!("error atendiendo a {}: {}", peer, e);
            }
            self.set_active(None);
        }

        info!("shutdown pedido, cerrando {}", self.local_addr);
        Ok(())
    }

    fn set_active(&self, stream: Option<TcpStream>) {
        match self.active.lock() {
            Ok(mut active) => *active = stream,
            Err(poisoned) => *poisoned.into_inner() = stream,
        }
    }

    /// Lee un request de la conexión, lo despacha y escribe la respuesta
    ///
    /// Un head malformado se contesta con la página de error. Cualquier otro
    /// error se propaga y la conexión se cierra sin respuesta.
    fn handle_connection(&mut self, stream: TcpStream, peer: SocketAddr) -> ServerResult<()> {
        let mut reader = BufReader::new(stream.try_clone()?);
        let mut writer = stream;

        let request = match Request::read_from(&mut reader) {
            Ok(Some(request)) => request,
            Ok(None) | Err(ServerError::Parse(ParseError::EmptyRequest)) => {
                debug!("{} cerró sin mandar un request", peer);
                return Ok(());
            }
            Err(ServerError::Parse(e)) => {
                let mut response = Response::error(e.status(), &e.to_string());
                add_common_headers(&mut response);
                writer.write_all(&response.to_bytes())?;
                writer.flush()?;
                log_access(peer, "-", &response, response.body().len());
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let mut response = self.handler.dispatch(&request)?;
        add_common_headers(&mut response);

        let bytes = if request.method() == Method::HEAD {
            response.head_bytes()
        } else {
            response.to_bytes()
        };
        writer.write_all(&bytes)?;
        writer.flush()?;

        let sent = body_bytes_sent(request.method(), &response);
        log_access(peer, &request.request_line(), &response, sent);
        Ok(())
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        debug!("listener en {} cerrado", self.local_addr);
    }
}

/// Headers que llevan todas las respuestas
fn add_common_headers(response: &mut Response) {
    response.add_header("Server", SERVER_NAME);
    response.add_header("Date", &httpdate::fmt_http_date(std::time::SystemTime::now()));
    response.add_header("Connection", "close");
}

/// Una línea por request: `peer - - "request line" status bytes`
///
/// `body_len` son los bytes de body que realmente se mandaron.
fn log_access(peer: SocketAddr, request_line: &str, response: &Response, body_len: usize) {
    let status = response.status();
    let line = format!(
        "{} - - \"{}\" {} {}",
        peer.ip(),
        request_line,
        status.as_u16(),
        body_len
    );

    if status.is_client_error() || status.is_server_error() {
        warn!("{}", line);
    } else {
        info!("{}", line);
    }
}

/// Bytes de body que salen por el socket (HEAD no manda body)
fn body_bytes_sent(method: Method, response: &Response) -> usize {
    match method {
        Method::HEAD => 0,
        Method::GET | Method::POST => response.body().len(),
    }
}

/// Dirección a la que conectarse para despertar al listener
///
/// Un listener en 0.0.0.0 o :: se despierta por loopback.
fn wake_address(local: SocketAddr) -> SocketAddr {
    let ip = match local.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    SocketAddr::new(ip, local.port())
}
