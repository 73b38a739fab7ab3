//! Browser-global identifier exclusion list.
//!
//! Free identifiers matching a default `window` property or method are never
//! treated as missing module dependencies.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Default properties on the browser `window` object.
pub const WINDOW_PROPERTIES: &[&str] = &[
    "window", "Boolean", "Number", "JSON", "DataView", "ArrayBuffer", "undefined", "Function",
    "Error", "String", "Math", "WeakSet", "eval", "document", "Intl", "Object", "URIError",
    "Uint16Array", "encodeURI", "Array", "escape", "Int32Array", "Int16Array", "decodeURI", "NaN",
    "Uint8ClampedArray", "isNaN", "Infinity", "external", "Promise", "parseFloat", "unescape",
    "WeakMap", "RegExp", "Uint32Array", "ReferenceError", "EvalError", "Date", "RangeError",
    "chrome", "top", "isFinite", "__commandLineAPI", "parseInt", "SyntaxError", "Uint8Array",
    "encodeURIComponent", "location", "Float64Array", "TypeError", "decodeURIComponent",
    "Float32Array", "Int8Array", "webkitOfflineAudioContext", "webkitAudioContext",
    "OfflineAudioContext", "AudioContext", "speechSynthesis", "webkitSpeechRecognitionEvent",
    "webkitSpeechRecognitionError", "webkitSpeechRecognition", "webkitSpeechGrammarList",
    "webkitSpeechGrammar", "webkitRTCPeerConnection", "webkitMediaStream",
    "SpeechSynthesisUtterance", "SpeechSynthesisEvent", "Notification", "MediaSource",
    "XSLTProcessor", "SharedWorker", "MediaKeyEvent", "Path2D", "TimeRanges", "MediaError",
    "HTMLVideoElement", "HTMLSourceElement", "HTMLMediaElement", "Audio", "HTMLAudioElement",
    "FontFace", "MediaKeyError", "HTMLDialogElement", "localStorage", "sessionStorage",
    "applicationCache", "webkitStorageInfo", "webkitIDBTransaction", "webkitIDBRequest",
    "webkitIDBObjectStore", "webkitIDBKeyRange", "webkitIDBIndex", "webkitIDBFactory",
    "webkitIDBDatabase", "webkitIDBCursor", "indexedDB", "webkitIndexedDB", "crypto", "WebSocket",
    "WebKitGamepad", "RTCSessionDescription", "RTCIceCandidate", "MediaStreamTrack",
    "MediaStreamEvent", "IDBVersionChangeEvent", "IDBTransaction", "IDBRequest",
    "IDBOpenDBRequest", "IDBObjectStore", "IDBKeyRange", "IDBIndex", "IDBFactory", "IDBDatabase",
    "IDBCursorWithValue", "IDBCursor", "GamepadEvent", "Gamepad", "DeviceOrientationEvent",
    "DeviceMotionEvent", "CloseEvent", "WaveShaperNode", "ScriptProcessorNode", "PeriodicWave",
    "OscillatorNode", "OfflineAudioCompletionEvent", "MediaStreamAudioSourceNode",
    "MediaStreamAudioDestinationNode", "MediaElementAudioSourceNode", "GainNode",
    "DynamicsCompressorNode", "DelayNode", "ConvolverNode", "ChannelSplitterNode",
    "ChannelMergerNode", "BiquadFilterNode", "AudioProcessingEvent", "AudioParam", "AudioNode",
    "AudioListener", "AudioDestinationNode", "AudioBufferSourceNode", "AudioBuffer",
    "AnalyserNode", "XPathResult", "XPathExpression", "XPathEvaluator", "XMLSerializer",
    "XMLHttpRequestUpload", "XMLHttpRequestProgressEvent", "XMLHttpRequest", "XMLDocument",
    "Worker", "Window", "WheelEvent", "WebKitPoint", "WebKitCSSTransformValue", "WebKitCSSMatrix",
    "WebKitCSSFilterValue", "WebKitCSSFilterRule", "WebKitAnimationEvent", "WebGLUniformLocation",
    "WebGLTexture", "WebGLShaderPrecisionFormat", "WebGLShader", "WebGLRenderingContext",
    "WebGLRenderbuffer", "WebGLProgram", "WebGLFramebuffer", "WebGLContextEvent", "WebGLBuffer",
    "WebGLActiveInfo", "ValidityState", "VTTCue", "URL", "UIEvent", "TreeWalker",
    "TransitionEvent", "TrackEvent", "TouchList", "TouchEvent", "Touch", "TextTrackList",
    "TextTrackCueList", "TextTrackCue", "TextTrack", "TextMetrics", "TextEvent", "Text",
    "StyleSheetList", "StyleSheet", "StorageEvent", "Storage", "ShadowRoot", "Selection", "Screen",
    "SVGZoomEvent", "SVGViewSpec", "SVGViewElement", "SVGUseElement", "SVGUnitTypes",
    "SVGTransformList", "SVGTransform", "SVGTitleElement", "SVGTextPositioningElement",
    "SVGTextPathElement", "SVGTextElement", "SVGTextContentElement", "SVGTSpanElement",
    "SVGSymbolElement", "SVGSwitchElement", "SVGStyleElement", "SVGStringList", "SVGStopElement",
    "SVGSetElement", "SVGScriptElement", "SVGSVGElement", "SVGRenderingIntent", "SVGRectElement",
    "SVGRect", "SVGRadialGradientElement", "SVGPreserveAspectRatio", "SVGPolylineElement",
    "SVGPolygonElement", "SVGPointList", "SVGPoint", "SVGPatternElement", "SVGPathSegMovetoRel",
    "SVGPathSegMovetoAbs", "SVGPathSegList", "SVGPathSegLinetoVerticalRel",
    "SVGPathSegLinetoVerticalAbs", "SVGPathSegLinetoRel", "SVGPathSegLinetoHorizontalRel",
    "SVGPathSegLinetoHorizontalAbs", "SVGPathSegLinetoAbs", "SVGPathSegCurvetoQuadraticSmoothRel",
    "SVGPathSegCurvetoQuadraticSmoothAbs", "SVGPathSegCurvetoQuadraticRel",
    "SVGPathSegCurvetoQuadraticAbs", "SVGPathSegCurvetoCubicSmoothRel",
    "SVGPathSegCurvetoCubicSmoothAbs", "SVGPathSegCurvetoCubicRel", "SVGPathSegCurvetoCubicAbs",
    "SVGPathSeg", "SVGPathSegClosePath", "SVGPathSegArcRel", "SVGPathSegArcAbs", "SVGPathElement",
    "SVGNumberList", "SVGNumber", "SVGMetadataElement", "SVGMatrix", "SVGMaskElement",
    "SVGMarkerElement", "SVGMPathElement", "SVGLinearGradientElement", "SVGLineElement",
    "SVGLengthList", "SVGLength", "SVGImageElement", "SVGGraphicsElement", "SVGGradientElement",
    "SVGGeometryElement", "SVGGElement", "SVGForeignObjectElement", "SVGFilterElement",
    "SVGFETurbulenceElement", "SVGFETileElement", "SVGFESpotLightElement",
    "SVGFESpecularLightingElement", "SVGFEPointLightElement", "SVGFEOffsetElement",
    "SVGFEMorphologyElement", "SVGFEMergeNodeElement", "SVGFEMergeElement", "SVGFEImageElement",
    "SVGFEGaussianBlurElement", "SVGFEFuncRElement", "SVGFEFuncGElement", "SVGFEFuncBElement",
    "SVGFEFuncAElement", "SVGFEFloodElement", "SVGFEDropShadowElement", "SVGFEDistantLightElement",
    "SVGFEDisplacementMapElement", "SVGFEDiffuseLightingElement", "SVGFEConvolveMatrixElement",
    "SVGFECompositeElement", "SVGFEComponentTransferElement", "SVGFEColorMatrixElement",
    "SVGFEBlendElement", "SVGEllipseElement", "SVGElement", "SVGDiscardElement", "SVGDescElement",
    "SVGDefsElement", "SVGCursorElement", "SVGComponentTransferFunctionElement",
    "SVGClipPathElement", "SVGCircleElement", "SVGAnimationElement", "SVGAnimatedTransformList",
    "SVGAnimatedString", "SVGAnimatedRect", "SVGAnimatedPreserveAspectRatio",
    "SVGAnimatedNumberList", "SVGAnimatedNumber", "SVGAnimatedLengthList", "SVGAnimatedLength",
    "SVGAnimatedInteger", "SVGAnimatedEnumeration", "SVGAnimatedBoolean", "SVGAnimatedAngle",
    "SVGAnimateTransformElement", "SVGAnimateMotionElement", "SVGAnimateElement", "SVGAngle",
    "SVGAElement", "Rect", "Range", "RGBColor", "ProgressEvent", "ProcessingInstruction",
    "PopStateEvent", "Plugin", "PluginArray", "PerformanceTiming", "PerformanceResourceTiming",
    "PerformanceNavigation", "PerformanceMeasure", "PerformanceMark", "PerformanceEntry",
    "Performance", "PageTransitionEvent", "OverflowEvent", "Notation", "NodeList", "NodeIterator",
    "NodeFilter", "Node", "Navigator", "NamedNodeMap", "MutationRecord", "MutationObserver",
    "MutationEvent", "MouseEvent", "MimeType", "MimeTypeArray", "MessagePort", "MessageEvent",
    "MessageChannel", "MediaList", "Location", "KeyboardEvent", "InputMethodContext", "ImageData",
    "ImageBitmap", "History", "HashChangeEvent", "HTMLUnknownElement", "HTMLUListElement",
    "HTMLTrackElement", "HTMLTitleElement", "HTMLTextAreaElement", "HTMLTemplateElement",
    "HTMLTableSectionElement", "HTMLTableRowElement", "HTMLTableElement", "HTMLTableColElement",
    "HTMLTableCellElement", "HTMLTableCaptionElement", "HTMLStyleElement", "HTMLSpanElement",
    "HTMLShadowElement", "HTMLSelectElement", "HTMLScriptElement", "HTMLQuoteElement",
    "HTMLProgressElement", "HTMLPreElement", "HTMLParamElement", "HTMLParagraphElement",
    "HTMLOutputElement", "HTMLOptionsCollection", "Option", "HTMLOptionElement",
    "HTMLOptGroupElement", "HTMLObjectElement", "HTMLOListElement", "HTMLModElement",
    "HTMLMeterElement", "HTMLMetaElement", "HTMLMenuElement", "HTMLMarqueeElement",
    "HTMLMapElement", "HTMLLinkElement", "HTMLLegendElement", "HTMLLabelElement", "HTMLLIElement",
    "HTMLKeygenElement", "HTMLInputElement", "Image", "HTMLImageElement", "HTMLIFrameElement",
    "HTMLHtmlElement", "HTMLHeadingElement", "HTMLHeadElement", "HTMLHRElement",
    "HTMLFrameSetElement", "HTMLFrameElement", "HTMLFormElement", "HTMLFormControlsCollection",
    "HTMLFontElement", "HTMLFieldSetElement", "HTMLEmbedElement", "HTMLElement", "HTMLDocument",
    "HTMLDivElement", "HTMLDirectoryElement", "HTMLDataListElement", "HTMLDListElement",
    "HTMLContentElement", "HTMLCollection", "HTMLCanvasElement", "HTMLButtonElement",
    "HTMLBodyElement", "HTMLBaseElement", "HTMLBRElement", "HTMLAreaElement", "HTMLAppletElement",
    "HTMLAnchorElement", "HTMLAllCollection", "FormData", "FocusEvent", "FileReader", "FileList",
    "FileError", "File", "EventTarget", "EventSource", "Event", "ErrorEvent", "Element",
    "DocumentType", "DocumentFragment", "Document", "DataTransferItemList", "DataTransfer",
    "DOMTokenList", "DOMStringMap", "DOMStringList", "DOMSettableTokenList", "DOMParser",
    "DOMImplementation", "DOMException", "DOMError", "CustomEvent", "Counter", "CompositionEvent",
    "Comment", "ClientRectList", "ClientRect", "CharacterData", "CanvasRenderingContext2D",
    "CanvasPattern", "CanvasGradient", "CSSViewportRule", "CSSValueList", "CSSValue",
    "CSSUnknownRule", "CSSStyleSheet", "CSSStyleRule", "CSSStyleDeclaration", "CSSRuleList",
    "CSSRule", "CSSPrimitiveValue", "CSSPageRule", "CSSMediaRule", "CSSKeyframesRule",
    "CSSKeyframeRule", "CSSImportRule", "CSSFontFaceRule", "CSSCharsetRule", "CDATASection",
    "Blob", "BeforeUnloadEvent", "BarProp", "AutocompleteErrorEvent", "Attr",
    "ApplicationCacheErrorEvent", "ApplicationCache", "SVGVKernElement", "SVGMissingGlyphElement",
    "SVGHKernElement", "SVGGlyphRefElement", "SVGGlyphElement", "SVGFontFaceUriElement",
    "SVGFontFaceSrcElement", "SVGFontFaceNameElement", "SVGFontFaceFormatElement",
    "SVGFontFaceElement", "SVGFontElement", "SVGAltGlyphItemElement", "SVGAltGlyphElement",
    "SVGAltGlyphDefElement", "WebKitMutationObserver", "webkitURL", "WebKitTransitionEvent", "CSS",
    "performance", "console", "devicePixelRatio", "styleMedia", "parent", "opener", "frames",
    "self", "defaultstatus", "defaultStatus", "status", "name", "length", "closed", "pageYOffset",
    "pageXOffset", "scrollY", "scrollX", "screenTop", "screenLeft", "screenY", "screenX",
    "innerWidth", "innerHeight", "outerWidth", "outerHeight", "offscreenBuffering", "frameElement",
    "event", "clientInformation", "navigator", "toolbar", "statusbar", "scrollbars", "personalbar",
    "menubar", "locationbar", "history", "screen",
];

/// Default methods on the browser `window` object.
pub const WINDOW_METHODS: &[&str] = &[
    "toString", "postMessage", "close", "blur", "focus", "onautocompleteerror", "onautocomplete",
    "ondeviceorientation", "ondevicemotion", "onunload", "onstorage", "onpopstate", "onpageshow",
    "onpagehide", "ononline", "onoffline", "onmessage", "onlanguagechange", "onhashchange",
    "onbeforeunload", "onwaiting", "onvolumechange", "ontoggle", "ontimeupdate", "onsuspend",
    "onsubmit", "onstalled", "onshow", "onselect", "onseeking", "onseeked", "onscroll", "onresize",
    "onreset", "onratechange", "onprogress", "onplaying", "onplay", "onpause", "onmousewheel",
    "onmouseup", "onmouseover", "onmouseout", "onmousemove", "onmouseleave", "onmouseenter",
    "onmousedown", "onloadstart", "onloadedmetadata", "onloadeddata", "onload", "onkeyup",
    "onkeypress", "onkeydown", "oninvalid", "oninput", "onfocus", "onerror", "onended",
    "onemptied", "ondurationchange", "ondrop", "ondragstart", "ondragover", "ondragleave",
    "ondragenter", "ondragend", "ondrag", "ondblclick", "oncuechange", "oncontextmenu", "onclose",
    "onclick", "onchange", "oncanplaythrough", "oncanplay", "oncancel", "onblur", "onabort",
    "onwheel", "onwebkittransitionend", "onwebkitanimationstart", "onwebkitanimationiteration",
    "onwebkitanimationend", "ontransitionend", "onsearch", "getSelection", "print", "stop", "open",
    "alert", "confirm", "prompt", "find", "scrollBy", "scrollTo", "scroll", "moveBy", "moveTo",
    "resizeBy", "resizeTo", "matchMedia", "getComputedStyle", "getMatchedCSSRules",
    "webkitConvertPointFromPageToNode", "webkitConvertPointFromNodeToPage",
    "requestAnimationFrame", "cancelAnimationFrame", "webkitRequestAnimationFrame",
    "webkitCancelAnimationFrame", "webkitCancelRequestAnimationFrame", "captureEvents",
    "releaseEvents", "btoa", "atob", "setTimeout", "clearTimeout", "setInterval", "clearInterval",
    "TEMPORARY", "PERSISTENT", "webkitRequestFileSystem", "webkitResolveLocalFileSystemURL",
    "openDatabase", "constructor",
];

static IGNORE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set: HashSet<&'static str> =
        HashSet::with_capacity(WINDOW_PROPERTIES.len() + WINDOW_METHODS.len() + 1);
    set.extend(WINDOW_PROPERTIES);
    set.extend(WINDOW_METHODS);
    // the AMD loader entry point itself is always in scope
    set.insert("define");
    set
});

/// Returns true when `name` is a browser built-in (or `define`) and must be
/// excluded from free-identifier analysis.
pub fn is_browser_global(name: &str) -> bool {
    IGNORE.contains(name)
}
