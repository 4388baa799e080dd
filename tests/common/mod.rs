//! Fixture servers shared by the HTTP integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use moodboard::proxy::{self, HttpUpstream, Proxy, ProxyConfig};
use tiny_http::{Header, Response, Server};

pub const ACCESS_KEY: &str = "test-key";

pub type RequestLog = Arc<Mutex<Vec<String>>>;

fn json_header() -> Header {
    "Content-Type: application/json".parse::<Header>().unwrap()
}

/// Serves a fixed quote list on `/quotes` and a 500 on `/broken`.
pub fn start_quote_server() -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let response = match request.url() {
                "/quotes" => Response::from_string(
                    r#"[{"text":"Genius is one percent inspiration.","author":"Thomas Edison"},
                        {"text":"Well begun is half done.","author":null},
                        {"text":"Act the way you want to feel."}]"#,
                )
                .with_header(json_header()),
                "/broken" => Response::from_string("oops").with_status_code(500),
                _ => Response::from_string("Not Found").with_status_code(404),
            };
            let _ = request.respond(response);
        }
    });
    format!("http://{}", addr)
}

/// Stand-in for the photo provider. Records every request URL.
pub fn start_provider() -> (String, RequestLog) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let base = format!("http://{}", server.server_addr().to_ip().unwrap());
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let seen = log.clone();
    let own_base = base.clone();
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let url = request.url().to_string();
            seen.lock().unwrap().push(url.clone());
            let path = url.split('?').next().unwrap_or_default().to_string();
            let response = match path.as_str() {
                "/photos/random" => Response::from_string(format!(
                    r#"{{"id":"p1","urls":{{"small":"{0}/img/p1-small.jpg","full":"{0}/img/p1.jpg"}},
                        "links":{{"download_location":"{0}/photos/p1/download?ixid=abc"}}}}"#,
                    own_base
                )),
                "/photos/p1/download" => Response::from_string(format!(r#"{{"url":"{}/img/p1.jpg"}}"#, own_base)),
                _ => Response::from_string(r#"{"errors":["Not found"]}"#).with_status_code(404),
            };
            let _ = request.respond(response.with_header(json_header()));
        }
    });
    (base, log)
}

/// Runs the real proxy in front of `api_base`; returns the endpoint URL.
pub fn start_proxy(api_base: &str) -> String {
    let server = proxy::bind("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let config = ProxyConfig {
        access_key: ACCESS_KEY.to_string(),
        api_base: api_base.to_string(),
        timeout_ms: 5000,
    };
    // The blocking client has to be built off the async test runtime.
    std::thread::spawn(move || {
        let upstream = HttpUpstream::new(&config).unwrap();
        proxy::serve(server, Proxy::new(config, upstream));
    });
    format!("http://{}/fetch-unsplash", addr)
}
