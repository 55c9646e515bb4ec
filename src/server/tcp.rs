//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP: bind con reintentos acotados de
//! puerto, accept loop con bandera de parada y un thread por conexión.

use crate::browser::BrowserOpener;
use crate::config::Config;
use crate::files;
use crate::http::{Method, Request, Response, StatusCode};
use crate::metrics::MetricsCollector;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Errores fatales de arranque del servidor
#[derive(Debug)]
pub enum ServerError {
    /// Todos los puertos del rango probado estaban ocupados
    PortsExhausted {
        first_port: u16,
        last_port: u16,
        attempts: u32,
    },

    /// Error de bind que no es "puerto ocupado": no se reintenta
    Bind(io::Error),

    /// No se pudo resolver el directorio raíz
    RootDir(io::Error),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::PortsExhausted {
                first_port,
                last_port,
                attempts,
            } => write!(
                f,
                "no free port found after {} attempts (tried ports {}-{})",
                attempts, first_port, last_port
            ),
            ServerError::Bind(e) => write!(f, "failed to bind listener: {}", e),
            ServerError::RootDir(e) => write!(f, "failed to resolve root directory: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

/// Servidor HTTP de archivos estáticos
pub struct Server {
    config: Config,
    metrics: Arc<MetricsCollector>,
    running: Arc<AtomicBool>,
    bound_addr: Arc<Mutex<Option<SocketAddr>>>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsCollector::new()),
            running: Arc::new(AtomicBool::new(false)),
            bound_addr: Arc::new(Mutex::new(None)),
        }
    }

    /// Verifica si el servidor está corriendo
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Detiene el accept loop; `run()` retorna solo después de esto
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Dirección real del listener (útil en tests con puerto 0)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        *self.bound_addr.lock().unwrap()
    }

    /// Collector de métricas del servidor
    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Hace bind del listener, avanzando al puerto siguiente cuando el
    /// actual está ocupado, hasta `max_retries` reintentos.
    ///
    /// Cualquier error de bind distinto de `AddrInUse` es fatal y no se
    /// reintenta.
    pub fn bind_with_retry(
        host: &str,
        first_port: u16,
        max_retries: u32,
    ) -> Result<TcpListener, ServerError> {
        let mut port = first_port;

        for attempt in 0..=max_retries {
            match TcpListener::bind((host, port)) {
                Ok(listener) => return Ok(listener),
                Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                    if attempt == max_retries {
                        break;
                    }
                    match port.checked_add(1) {
                        Some(next) => {
                            eprintln!("   ❌ Puerto {} ocupado. Probando puerto {}...", port, next);
                            port = next;
                        }
                        // Se acabó el rango de puertos
                        None => break,
                    }
                }
                Err(e) => return Err(ServerError::Bind(e)),
            }
        }

        Err(ServerError::PortsExhausted {
            first_port,
            last_port: port,
            attempts: u32::from(port - first_port) + 1,
        })
    }

    /// Arranca el servidor y bloquea hasta que `stop()` lo detenga.
    ///
    /// Retorna `Ok(())` tras una parada limpia; los errores de arranque
    /// (raíz inexistente, puertos agotados, bind fatal) se reportan con
    /// un `ServerError` tipado.
    pub fn run(&self) -> Result<(), ServerError> {
        // La raíz se resuelve una sola vez, nunca se recarga
        let root = self.config.effective_root().map_err(ServerError::RootDir)?;

        println!("[*] Iniciando servidor en {}", self.config.address());

        let listener =
            Self::bind_with_retry(&self.config.host, self.config.port, self.config.max_port_retries)?;
        listener.set_nonblocking(true).map_err(ServerError::Bind)?;

        let local = listener.local_addr().map_err(ServerError::Bind)?;
        // running se publica antes que la dirección: quien vea el
        // local_addr ya puede detener el servidor con stop()
        self.running.store(true, Ordering::Relaxed);
        *self.bound_addr.lock().unwrap() = Some(local);

        let port = local.port();
        println!("\n🚀 Dashboard corriendo en:");
        println!("   http://localhost:{}", port);
        println!("   http://127.0.0.1:{}", port);
        println!();

        match files::list_assets(&root) {
            Ok(assets) => {
                println!("📁 Archivos servidos:");
                for asset in &assets {
                    println!("   - {}", asset);
                }
            }
            Err(e) => {
                eprintln!("   ⚠️  No se pudo listar {}: {}", root.display(), e);
            }
        }

        println!("\n⏹️  Ctrl+C para detener el servidor\n");

        // La tarea del navegador vive lo que viva run(): si el servidor
        // se detiene antes del plazo, el Drop la cancela.
        let _browser = if self.config.no_browser {
            None
        } else {
            Some(BrowserOpener::schedule(
                format!("http://localhost:{}", port),
                Duration::from_millis(self.config.browser_delay_ms),
            ))
        };

        while self.running.load(Ordering::Relaxed) {
            match listener.accept() {
                Ok((stream, addr)) => {
                    let metrics = Arc::clone(&self.metrics);
                    let root = root.clone();
                    let index = self.config.index.clone();

                    thread::spawn(move || {
                        if let Err(e) =
                            Self::handle_connection(stream, addr, &root, &index, &metrics)
                        {
                            eprintln!("   ❌ Error en la conexión {}: {}", addr, e);
                        }
                    });
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => {
                    // Sin conexiones pendientes: dormir y revisar la bandera
                    thread::sleep(Duration::from_millis(10));
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        // Cerrar el socket de escucha antes del aviso de cierre
        drop(listener);

        println!("\n👋 Servidor detenido");
        if let Ok(json) = serde_json::to_string(&self.metrics.snapshot()) {
            println!("📊 Resumen: {}", json);
        }

        Ok(())
    }

    /// Atiende una conexión: lee el request, lo despacha al handler de
    /// archivos y escribe la respuesta finalizada.
    fn handle_connection(
        mut stream: TcpStream,
        addr: SocketAddr,
        root: &Path,
        index: &str,
        metrics: &MetricsCollector,
    ) -> io::Result<()> {
        // El listener es no-bloqueante; el stream aceptado debe bloquear
        stream.set_nonblocking(false)?;
        stream.set_read_timeout(Some(Duration::from_secs(10)))?;
        stream.set_write_timeout(Some(Duration::from_secs(10)))?;

        let start = Instant::now();

        let mut buffer = [0u8; 8192];
        let bytes_read = stream.read(&mut buffer)?;

        if bytes_read == 0 {
            return Ok(());
        }

        let (mut response, head_only, request_line) = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => {
                let line = format!("{} {}", request.method().as_str(), request.path());
                let head_only = request.method() == Method::HEAD;
                (files::serve(&request, root, index), head_only, line)
            }
            Err(e) => (
                Response::error(StatusCode::BadRequest, &format!("Invalid request: {}", e)),
                false,
                "(parse error)".to_string(),
            ),
        };

        Self::finalize_response(&mut response);

        let response_bytes = if head_only {
            response.head_bytes()
        } else {
            response.to_bytes()
        };
        stream.write_all(&response_bytes)?;
        stream.flush()?;

        let latency = start.elapsed();
        metrics.record_request(response.status().as_u16(), response_bytes.len() as u64);

        println!(
            "   ✅ {} {} → {} ({:.2}ms)",
            addr.ip(),
            request_line,
            response.status(),
            latency.as_secs_f64() * 1000.0
        );

        Ok(())
    }

    /// Agrega los headers comunes a toda respuesta, también a las de
    /// error: los tres headers CORS exactos, Server y Connection.
    fn finalize_response(response: &mut Response) {
        response.add_header("Access-Control-Allow-Origin", "*");
        response.add_header("Access-Control-Allow-Methods", "GET, POST, OPTIONS");
        response.add_header("Access-Control-Allow-Headers", "Content-Type");
        response.add_header("Server", "dashboard-server/0.1");
        response.add_header("Connection", "close");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::net::{TcpListener, TcpStream};
    use std::path::PathBuf;
    use std::sync::atomic::AtomicUsize;

    static DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

    fn temp_root(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "dashboard_server_tcp_{}_{}_{}",
            label,
            std::process::id(),
            DIR_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        fs::create_dir_all(&dir).expect("create temp root");
        fs::write(dir.join("dashboard.html"), "<html><body>dash</body></html>").unwrap();
        dir
    }

    fn ephemeral_listener() -> TcpListener {
        TcpListener::bind("127.0.0.1:0").expect("bind")
    }

    /// Lanza handle_connection para una única conexión y retorna la
    /// respuesta completa como texto.
    fn roundtrip(root: &Path, raw_request: &[u8]) -> String {
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();
        let metrics = MetricsCollector::new();

        let t = thread::spawn({
            let root = root.to_path_buf();
            let metrics = metrics.clone();
            move || {
                let (stream, peer) = listener.accept().unwrap();
                Server::handle_connection(stream, peer, &root, "dashboard.html", &metrics).unwrap();
            }
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(raw_request).unwrap();
        client.shutdown(std::net::Shutdown::Write).unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        t.join().unwrap();

        String::from_utf8_lossy(&buf).to_string()
    }

    #[test]
    fn test_bind_with_retry_free_port() {
        let listener = Server::bind_with_retry("127.0.0.1", 0, 0).unwrap();
        assert!(listener.local_addr().is_ok());
    }

    #[test]
    fn test_bind_with_retry_skips_occupied_port() {
        let blocker = ephemeral_listener();
        let occupied = blocker.local_addr().unwrap().port();

        let listener = Server::bind_with_retry("127.0.0.1", occupied, 20).unwrap();
        let bound = listener.local_addr().unwrap().port();

        assert!(bound > occupied, "expected a port above {}, got {}", occupied, bound);
        assert!(u32::from(bound) <= u32::from(occupied) + 20);
    }

    #[test]
    fn test_bind_with_retry_exhausts_without_retries() {
        let blocker = ephemeral_listener();
        let occupied = blocker.local_addr().unwrap().port();

        let result = Server::bind_with_retry("127.0.0.1", occupied, 0);

        match result {
            Err(ServerError::PortsExhausted {
                first_port,
                attempts,
                ..
            }) => {
                assert_eq!(first_port, occupied);
                assert_eq!(attempts, 1);
            }
            other => panic!("expected PortsExhausted, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_bind_with_retry_fatal_error_is_not_retried() {
        // Una IP que no es local produce un error distinto de AddrInUse
        let result = Server::bind_with_retry("198.51.100.1", 8000, 5);
        assert!(matches!(result, Err(ServerError::Bind(_))));
    }

    #[test]
    fn test_handle_connection_serves_root() {
        let root = temp_root("root");
        let text = roundtrip(&root, b"GET / HTTP/1.0\r\n\r\n");

        assert!(text.contains("200 OK"));
        assert!(text.contains("<body>dash</body>"));
        // CORS en respuestas exitosas
        assert!(text.contains("Access-Control-Allow-Origin: *"));
        assert!(text.contains("Access-Control-Allow-Methods: GET, POST, OPTIONS"));
        assert!(text.contains("Access-Control-Allow-Headers: Content-Type"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_handle_connection_404_keeps_cors() {
        let root = temp_root("missing");
        let text = roundtrip(&root, b"GET /nope.css HTTP/1.0\r\n\r\n");

        assert!(text.contains("404 Not Found"));
        assert!(text.contains("Access-Control-Allow-Origin: *"));
        assert!(text.contains("Access-Control-Allow-Methods: GET, POST, OPTIONS"));
        assert!(text.contains("Access-Control-Allow-Headers: Content-Type"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_handle_connection_parse_error_returns_400_with_cors() {
        let root = temp_root("garbage");
        let text = roundtrip(&root, b"\x00\x01\x02\x03garbage");

        assert!(text.contains("400 Bad Request"));
        assert!(text.contains("Invalid request"));
        assert!(text.contains("Access-Control-Allow-Origin: *"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_handle_connection_head_omits_body() {
        let root = temp_root("head");
        let text = roundtrip(&root, b"HEAD /dashboard.html HTTP/1.0\r\n\r\n");

        assert!(text.contains("200 OK"));
        assert!(text.contains("Content-Length: 30"));
        assert!(!text.contains("<body>dash</body>"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_handle_connection_peer_closed_immediately() {
        // Cubre la rama bytes_read == 0
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();
        let root = temp_root("closed");
        let metrics = MetricsCollector::new();

        let t = thread::spawn({
            let root = root.clone();
            let metrics = metrics.clone();
            move || {
                let (stream, peer) = listener.accept().unwrap();
                Server::handle_connection(stream, peer, &root, "dashboard.html", &metrics).unwrap();
            }
        });

        // Cliente que conecta y cierra sin mandar datos
        drop(TcpStream::connect(addr).unwrap());

        t.join().unwrap();
        assert_eq!(metrics.snapshot().total_requests, 0);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_handle_connection_records_metrics() {
        let root = temp_root("metrics");
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();
        let metrics = MetricsCollector::new();

        let t = thread::spawn({
            let root = root.clone();
            let metrics = metrics.clone();
            move || {
                let (stream, peer) = listener.accept().unwrap();
                Server::handle_connection(stream, peer, &root, "dashboard.html", &metrics).unwrap();
            }
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(b"GET / HTTP/1.0\r\n\r\n").unwrap();
        client.shutdown(std::net::Shutdown::Write).unwrap();
        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        t.join().unwrap();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_requests, 1);
        assert_eq!(snapshot.status_codes.get(&200), Some(&1));
        assert!(snapshot.bytes_sent > 0);

        fs::remove_dir_all(&root).ok();
    }
}
