pub mod header {
    pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
    pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
    pub const ACCESS_CONTROL_MAX_AGE: &str = "Access-Control-Max-Age";
    pub const ACCESS_CONTROL_REQUEST_HEADERS: &str = "Access-Control-Request-Headers";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const ORIGIN: &str = "Origin";
    pub const VARY: &str = "Vary";
    pub const HELIUS_PROXY_MARKER: &str = "X-Helius-Cloudflare-Proxy";
}

pub mod method {
    pub const GET: &str = "GET";
    pub const HEAD: &str = "HEAD";
    pub const OPTIONS: &str = "OPTIONS";
    pub const POST: &str = "POST";
    pub const PUT: &str = "PUT";
}

pub mod upstream {
    /// JSON-RPC host; serves the root path and WebSocket subscriptions.
    pub const MAINNET_HOST: &str = "mainnet.helius-rpc.com";
    /// REST-style endpoint surface; serves every path other than `/`.
    pub const API_HOST: &str = "api.helius.xyz";
    pub const API_KEY_PARAM: &str = "api-key";
    pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
    pub const WEBSOCKET: &str = "websocket";
}

pub mod response {
    pub const FORBIDDEN_BODY: &str = "Forbidden (CORS)";
    pub const BAD_GATEWAY_BODY: &str = "Bad Gateway";
    pub const BAD_REQUEST_BODY: &str = "Bad Request";
}

pub const DEFAULT_MAX_AGE: u64 = 86_400;
