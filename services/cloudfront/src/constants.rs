// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// API version every resource path is rooted at.
pub const API_VERSION: &str = "2010-11-01";
/// Default base URL of the CloudFront API.
pub const DEFAULT_ENDPOINT: &str = "https://cloudfront.amazonaws.com/";
/// XML namespace of request and response documents.
pub const XML_NAMESPACE: &str = "http://cloudfront.amazonaws.com/doc/2010-11-01/";

// Headers used by CloudFront.
pub const X_AMZ_REQUEST_ID: &str = "x-amz-request-id";

// Env values used by CloudFront.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_CLOUDFRONT_ENDPOINT: &str = "AWS_CLOUDFRONT_ENDPOINT";
pub const HTTPS_PROXY: &str = "HTTPS_PROXY";

/// AsciiSet for identifiers placed into a path segment and for query keys and values.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
