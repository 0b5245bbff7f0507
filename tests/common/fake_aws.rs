// Minimal AWS JSON-protocol endpoint for driving the real SDK clients

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// A request as seen by the fake endpoint
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Value of the `x-amz-target` header, e.g. `DynamoDB_20120810.DescribeTable`
    pub target: String,
    pub body: String,
}

/// Canned answer for one request
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn ok(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    /// AWS JSON error with the given `__type`
    pub fn error(error_type: &str, message: &str) -> Self {
        Self {
            status: 400,
            body: format!(r#"{{"__type":"{error_type}","message":"{message}"}}"#),
        }
    }
}

type Responder = dyn Fn(&RecordedRequest) -> CannedResponse + Send + Sync;

/// Serves canned responses on a local port until the test process exits
pub struct FakeAwsServer {
    url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeAwsServer {
    pub fn start<F>(respond: F) -> Self
    where
        F: Fn(&RecordedRequest) -> CannedResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let respond: Arc<Responder> = Arc::new(respond);

        let recorded = requests.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let recorded = recorded.clone();
                let respond = respond.clone();
                thread::spawn(move || serve_connection(stream, &recorded, respond.as_ref()));
            }
        });

        Self { url, requests }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Targets of all requests received so far, in order
    pub fn targets(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.target).collect()
    }
}

// Keep-alive loop: one connection may carry several requests
fn serve_connection(
    stream: TcpStream,
    recorded: &Mutex<Vec<RecordedRequest>>,
    respond: &Responder,
) {
    let mut writer = match stream.try_clone() {
        Ok(writer) => writer,
        Err(_) => return,
    };
    let mut reader = BufReader::new(stream);

    while let Some(request) = read_request(&mut reader) {
        recorded.lock().unwrap().push(request.clone());
        let response = respond(&request);

        let content_type = if request.target.starts_with("TrentService") {
            "application/x-amz-json-1.1"
        } else {
            "application/x-amz-json-1.0"
        };
        let reason = if response.status == 200 { "OK" } else { "Bad Request" };
        let head = format!(
            "HTTP/1.1 {} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\n\r\n",
            response.status,
            response.body.len()
        );
        if writer.write_all(head.as_bytes()).is_err()
            || writer.write_all(response.body.as_bytes()).is_err()
            || writer.flush().is_err()
        {
            return;
        }
    }
}

fn read_request(reader: &mut BufReader<TcpStream>) -> Option<RecordedRequest> {
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).ok()? == 0 {
        return None;
    }

    let mut target = String::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            return None;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            if name.eq_ignore_ascii_case("x-amz-target") {
                target = value.to_string();
            } else if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().ok()?;
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;

    Some(RecordedRequest {
        target,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}
